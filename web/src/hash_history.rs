//! Router history kept in the URL fragment, so every location reads
//! `#/module/action/record` and the page itself never changes path.

/// Router path for a `location.hash` value (`""`, `"#"`, `"#/Accounts"`).
pub fn route_from_hash(hash: &str) -> String {
    let route = hash.trim_start_matches('#');
    match route {
        "" => "/".to_string(),
        _ if route.starts_with('/') => route.to_string(),
        _ => format!("/{route}"),
    }
}

/// Fragment URL for a router path.
pub fn hash_url(route: &str) -> String {
    format!("#{}", route_from_hash(route))
}

#[cfg(target_arch = "wasm32")]
pub use browser::HashHistory;

#[cfg(target_arch = "wasm32")]
mod browser {
    use std::sync::Arc;

    use dioxus::history::History;
    use tracing::warn;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Event, Window};

    use super::{hash_url, route_from_hash};

    pub struct HashHistory {
        window: Window,
    }

    impl HashHistory {
        pub fn new() -> Option<Self> {
            web_sys::window().map(|window| Self { window })
        }

        fn write(&self, route: &str, push: bool) {
            let Ok(history) = self.window.history() else {
                warn!("window.history unavailable");
                return;
            };
            let url = hash_url(route);
            let result = if push {
                history.push_state_with_url(&JsValue::NULL, "", Some(&url))
            } else {
                history.replace_state_with_url(&JsValue::NULL, "", Some(&url))
            };
            if let Err(err) = result {
                warn!(?err, %url, "history update failed");
            }
        }
    }

    impl History for HashHistory {
        fn current_route(&self) -> String {
            let hash = self.window.location().hash().unwrap_or_default();
            route_from_hash(&hash)
        }

        fn go_back(&self) {
            if let Ok(history) = self.window.history() {
                let _ = history.back();
            }
        }

        fn go_forward(&self) {
            if let Ok(history) = self.window.history() {
                let _ = history.forward();
            }
        }

        fn push(&self, route: String) {
            if route != self.current_route() {
                self.write(&route, true);
            }
        }

        fn replace(&self, route: String) {
            self.write(&route, false);
        }

        fn external(&self, url: String) -> bool {
            self.window.location().set_href(&url).is_ok()
        }

        fn updater(&self, callback: Arc<dyn Fn() + Send + Sync>) {
            let listener = Closure::wrap(Box::new(move |_: Event| callback()) as Box<dyn FnMut(Event)>);
            // Back/forward fire popstate; a hand-edited fragment fires hashchange.
            for event in ["popstate", "hashchange"] {
                if let Err(err) = self
                    .window
                    .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
                {
                    warn!(?err, event, "could not watch location");
                }
            }
            listener.forget();
        }
    }
}
