use crate::hooks::use_source;
use crate::i18n::{self};
use crate::routing::redirect::redirect;
use crate::services::AppServices;
use crate::t;
use dioxus::prelude::*;
use once_cell::sync::OnceCell;
use tracing::{debug, info};

// Navbar stylesheet
const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Platforms register a `NavBuilder` providing fully constructed `Link`
/// elements, so `ui` does not need to know each platform's `Route` enum.
///
/// If a builder is registered, `AppNavbar` renders localized labels *inside*
/// each supplied link. Without one, the raw `children` are rendered instead.
///
/// Example (in platform crate):
/// ```ignore
/// use ui::components::app_navbar::{NavBuilder, register_nav};
/// fn install_nav() {
///     register_nav(NavBuilder {
///         home: |label| rsx!( Link { class: "navbar__link", to: Route::Home {}, "{label}" } ),
///         listview: |label| rsx!( Link { class: "navbar__link", to: Route::Listview {}, "{label}" } ),
///         module: |module, label| rsx!( Link {
///             class: "navbar__link",
///             to: Route::Module { module: module.to_string() },
///             "{label}"
///         } ),
///     });
/// }
/// ```
pub struct NavBuilder {
    pub home: fn(label: &str) -> Element,
    pub listview: fn(label: &str) -> Element,
    /// One entry per navigation module (`module` is the module key).
    pub module: fn(module: &str, label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    i18n::init();

    let services = use_context::<AppServices>();
    let modules = use_source(&services.navigation);
    let user = use_source(services.session.user());

    let mut current_lang = use_signal(i18n::current_language);
    let locales = use_signal(i18n::locales);
    let show_switcher = locales().len() > 1;
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let lang_marker = lang_code_ctx.as_ref().map(|c| c()).unwrap_or_default();
    debug!(lang = %lang_marker, "navbar render");

    let on_change = move |evt: dioxus::events::FormEvent| {
        let val = evt.value();
        if i18n::set_language(&val).is_ok() {
            info!(lang = %val, "interface language changed");
            current_lang.set(val.clone());
            if let Some(mut code) = lang_code_ctx {
                code.set(val);
            }
        }
    };

    let session = services.session.clone();
    let on_sign_out = move |_: MouseEvent| {
        session.sign_out();
        redirect("/Login");
    };

    // Internal localized nav if a NavBuilder is registered.
    let internal_nav: Option<Element> = NAV_BUILDER.get().map(|b| {
        let home = (b.home)(&t!("nav-home"));
        let listview = (b.listview)(&t!("nav-list"));
        let module_links: Vec<Element> = modules()
            .unwrap_or_default()
            .iter()
            .map(|module| (b.module)(&module.name, &services.language.module_label(&module.name)))
            .collect();

        rsx! {
            nav { class: "navbar__links",
                {home}
                {listview}
                for link in module_links {
                    {link}
                }
            }
        }
    });

    let tagline = t!("tagline");
    let signed_in = user().flatten();

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{NAVBAR_CSS_INLINE}" }
        }

        header {
            id: "navbar",
            class: "navbar",
            div { style: "display:none", "{lang_marker}" }
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "CRM Desk" }
                    }
                    span { class: "navbar__brand-subtitle", "{tagline}" }
                }

                if let Some(nav) = internal_nav {
                    {nav}
                } else {
                    nav { class: "navbar__links", {children} }
                }

                if let Some(name) = signed_in {
                    div { class: "navbar__session",
                        span { class: "navbar__user", "{name}" }
                        button {
                            r#type: "button",
                            class: "button button--ghost navbar__sign-out",
                            onclick: on_sign_out,
                            {t!("nav-sign-out")}
                        }
                    }
                }

                if show_switcher {
                    div { class: "navbar__locale",
                        label {
                            class: "visually-hidden",
                            r#for: "locale-select",
                            {t!("nav-language-label")}
                        }
                        select {
                            id: "locale-select",
                            value: "{current_lang()}",
                            oninput: on_change,
                            for locale in locales() {
                                option { key: "{locale.tag}", value: locale.tag.clone(), {locale.name} }
                            }
                        }
                    }
                }
            }
        }
    }
}
