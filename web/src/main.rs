use dioxus::logger::tracing::Level;
use dioxus::prelude::*;
use tracing::warn;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::views::RouteOutlet;
use ui::{register_redirect, AppRoot};

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod hash_history;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/Listview")]
    Listview {},
    #[route("/Login")]
    Login {},
    #[route("/Home")]
    Home {},
    #[route("/:module")]
    Module { module: String },
    #[route("/:module/:action")]
    ModuleAction { module: String, action: String },
    #[route("/:module/:action/:record")]
    ModuleRecord { module: String, action: String, record: String },
    #[route("/:..segments")]
    Fallback { segments: Vec<String> },
}

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn nav_home(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Home {},
        "{label}"
    })
}
fn nav_listview(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Listview {},
        "{label}"
    })
}
fn nav_module(module: &str, label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Module { module: module.to_string() },
        "{label}"
    })
}

fn redirect_to(url: &str) {
    match url.parse::<Route>() {
        Ok(route) => {
            navigator().replace(route);
        }
        Err(err) => warn!(%url, %err, "redirect target is not a route"),
    }
}

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger init failed: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    let lang_code = use_signal(ui::i18n::current_language);
    use_context_provider(|| lang_code);

    register_nav(NavBuilder {
        home: nav_home,
        listview: nav_listview,
        module: nav_module,
    });
    register_redirect(redirect_to);
    use_hash_history();

    rsx! {
        document::Style { "{MAIN_CSS_INLINE}" }

        AppRoot {
            Router::<Route> {}
        }
    }
}

/// Routes live in the fragment (`#/Accounts/edit/123`). The browser renderer
/// installs path-based history at the root; this shadows it for the router.
#[cfg(target_arch = "wasm32")]
fn use_hash_history() {
    use std::rc::Rc;

    use dioxus::history::History;

    use_hook(|| match hash_history::HashHistory::new() {
        Some(history) => {
            provide_context(Rc::new(history) as Rc<dyn History>);
        }
        None => warn!("no window, keeping the default router history"),
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn use_hash_history() {}

/// A web-specific Router around the shared `AppNavbar` component
/// which allows us to use the web-specific `Route` enum.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        main { class: "app-main", Outlet::<Route> {} }
    }
}

// Every route hands its location to the shared outlet.

#[component]
fn Listview() -> Element {
    rsx! { RouteOutlet { url: "/Listview" } }
}

#[component]
fn Login() -> Element {
    rsx! { RouteOutlet { url: "/Login" } }
}

#[component]
fn Home() -> Element {
    rsx! { RouteOutlet { url: "/Home" } }
}

#[component]
fn Module(module: String) -> Element {
    rsx! { RouteOutlet { url: "/{module}" } }
}

#[component]
fn ModuleAction(module: String, action: String) -> Element {
    rsx! { RouteOutlet { url: "/{module}/{action}" } }
}

#[component]
fn ModuleRecord(module: String, action: String, record: String) -> Element {
    rsx! { RouteOutlet { url: "/{module}/{action}/{record}" } }
}

#[component]
fn Fallback(segments: Vec<String>) -> Element {
    let url = format!("/{}", segments.join("/"));
    rsx! { RouteOutlet { url } }
}
