use dioxus::prelude::*;
use tracing::debug;

use crate::hooks::use_source;
use crate::routing::redirect::redirect;
use crate::services::AppServices;
use crate::t;

#[component]
pub fn Home() -> Element {
    // Subscribe to the global language code (if provided) so we re-render on change.
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let lang_current = lang_code
        .as_ref()
        .map(|s| s())
        .unwrap_or_else(|| "en-US".to_string());
    debug!(lang = %lang_current, "home render");

    let services = use_context::<AppServices>();
    let modules = use_source(&services.navigation);
    let user = use_source(services.session.user());

    let greeting = match user().flatten() {
        Some(name) => t!("home-greeting", name = name),
        None => t!("home-greeting-guest"),
    };
    let cards: Vec<(String, String, String)> = modules()
        .unwrap_or_default()
        .into_iter()
        .map(|module| {
            let label = services.language.module_label(&module.name);
            let target = format!("/{}", module.name);
            (module.name, label, target)
        })
        .collect();

    rsx! {
        section { class: "page page-home",
            h1 { {t!("home-title")} }
            p { class: "page-home__greeting", "{greeting}" }
            p { {t!("home-intro")} }

            if cards.is_empty() {
                p { class: "page-home__empty", {t!("home-no-modules")} }
            } else {
                ul { class: "page-home__modules",
                    for (name, label, target) in cards {
                        li { key: "{name}", class: "page-home__module",
                            button {
                                r#type: "button",
                                class: "button button--accent",
                                onclick: move |_| redirect(&target),
                                "{label}"
                            }
                        }
                    }
                }
            }
            p { class: "page-home__cta",
                button {
                    r#type: "button",
                    class: "button button--primary",
                    onclick: move |_| redirect("/Listview"),
                    {t!("home-open-list")}
                }
            }
        }
    }
}
