use dioxus::prelude::*;
use tracing::info;

use crate::routing::redirect::redirect;
use crate::services::AppServices;
use crate::t;

#[component]
pub fn Login() -> Element {
    let services = use_context::<AppServices>();
    let mut user_name = use_signal(String::new);
    let mut rejected = use_signal(|| false);

    let session = services.session.clone();
    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let name = user_name();
        if session.sign_in(&name) {
            info!(user = %name.trim(), "signed in");
            rejected.set(false);
            redirect("/Home");
        } else {
            rejected.set(true);
        }
    };

    rsx! {
        section { class: "page page-login",
            form { class: "login-form", onsubmit: on_submit,
                h1 { class: "login-form__title", {t!("login-title")} }
                label { class: "login-form__label", r#for: "login-user", {t!("login-username")} }
                input {
                    id: "login-user",
                    class: "login-form__input",
                    r#type: "text",
                    autocomplete: "username",
                    value: "{user_name}",
                    oninput: move |evt| user_name.set(evt.value()),
                }
                if rejected() {
                    p { class: "login-form__error", role: "alert", {t!("login-error-blank")} }
                }
                button { r#type: "submit", class: "button button--primary", {t!("login-submit")} }
            }
        }
    }
}
