#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

#[cfg(feature = "desktop")]
use std::path::PathBuf;

#[cfg(feature = "desktop")]
use dioxus::desktop::{tao::window::WindowBuilder, Config};
use dioxus::logger::tracing::Level;
use dioxus::prelude::*;
use tracing::warn;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::views::RouteOutlet;
use ui::{register_redirect, AppRoot};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(DesktopNavbar)]
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
)); // Embedded shared theme (ui/assets/theme/main.css); no separate desktop /assets needed.

#[cfg(feature = "desktop")]
fn main() {
    init_logging();
    let resource_dir = resolve_resource_dir();

    LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(
                    WindowBuilder::new()
                        .with_title(format!("CRM Desk – v{}", env!("CARGO_PKG_VERSION")))
                        .with_maximized(true),
                )
                .with_resource_directory(resource_dir),
        )
        .launch(App);
}

#[cfg(all(feature = "server", not(feature = "desktop")))]
fn main() {
    init_logging();
    LaunchBuilder::server().launch(App);
}

fn init_logging() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger init failed: {err}");
    }
}

fn nav_home(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::Home {}, "{label}" })
}
fn nav_listview(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::Listview {}, "{label}" })
}
fn nav_module(module: &str, label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::Module { module: module.to_string() }, "{label}" })
}

fn redirect_to(url: &str) {
    match url.parse::<Route>() {
        Ok(route) => {
            navigator().replace(route);
        }
        Err(err) => warn!(%url, %err, "redirect target is not a route"),
    }
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    // Global reactive language code signal; AppNavbar updates it on language selection.
    let lang_code = use_signal(ui::i18n::current_language);
    use_context_provider(|| lang_code);

    register_nav(NavBuilder {
        home: nav_home,
        listview: nav_listview,
        module: nav_module,
    });
    register_redirect(redirect_to);

    // Runtime maximize fallback (in case initial builder maximize is ignored by WM)
    #[cfg(feature = "desktop")]
    {
        let win = dioxus::desktop::use_window();
        use_effect(move || {
            win.set_maximized(true);
        });
    }

    rsx! {
        // Always inline embedded CSS (no external file dependency for desktop builds)
        document::Style { "{MAIN_CSS_INLINE}" }

        AppRoot {
            // Keyed wrapper div forces a full remount of the routed subtree on language change.
            div {
                key: "{lang_code()}",
                Router::<Route> { }
            }
        }
    }
}

#[cfg(feature = "desktop")]
fn resolve_resource_dir() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        // During `cargo run` / `dx serve` load directly from the crate.
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
    }

    #[cfg(not(debug_assertions))]
    {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("assets")))
            .unwrap_or_else(|| PathBuf::from("assets"))
    }
}

/// A desktop-specific Router around the shared `AppNavbar` component
/// which allows us to use the desktop-specific `Route` enum.
#[component]
fn DesktopNavbar() -> Element {
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
