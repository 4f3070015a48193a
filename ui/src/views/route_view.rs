use dioxus::prelude::*;
use tracing::{debug, warn};

use super::{ClassicView, Home, ListView, Login};
use crate::hooks::use_source;
use crate::routing::redirect::redirect;
use crate::routing::resolve::ResolvedValue;
use crate::routing::table::split_url;
use crate::routing::{ActiveRoute, NavigationOutcome, NavigationPhase, Navigator, ViewTarget};
use crate::t;

fn normalized(url: &str) -> String {
    format!("/{}", split_url(url).join("/"))
}

/// Runs a navigation for `url` whenever it changes and renders the active
/// route's view. Guard redirects and wildcard fallbacks are pushed back to the
/// platform router through [`redirect`].
#[component]
pub fn RouteOutlet(#[props(into)] url: String) -> Element {
    let navigator = use_context::<Navigator>();
    let active = use_source(navigator.active());
    let phase = use_source(navigator.phase());

    let outcome = use_resource(use_reactive((&url,), move |(url,)| {
        let navigator = navigator.clone();
        async move {
            let outcome = navigator.navigate(&url).await;
            match &outcome {
                Ok(NavigationOutcome::Redirected { to }) => redirect(to),
                Ok(NavigationOutcome::Activated(active)) if active.route.url != normalized(&url) => {
                    debug!(from = %url, to = %active.route.url, "fallback route, syncing location");
                    redirect(&active.route.url);
                }
                Err(err) => warn!(%url, %err, "navigation failed"),
                _ => {}
            }
            outcome.map_err(|err| err.to_string())
        }
    }));

    let resolving = phase() == Some(NavigationPhase::Resolving);
    let failure = match &*outcome.read() {
        Some(Err(message)) => Some(message.clone()),
        _ => None,
    };
    let denied = matches!(
        &*outcome.read(),
        Some(Ok(NavigationOutcome::Denied { .. }))
    );

    rsx! {
        if resolving {
            div { class: "route-progress", role: "progressbar", aria_label: t!("route-loading") }
        }
        if let Some(message) = failure {
            section { class: "page page-error",
                h1 { {t!("route-failed")} }
                p { class: "page-error__detail", "{message}" }
            }
        } else if denied {
            section { class: "page page-error",
                h1 { {t!("route-denied")} }
            }
        } else if let Some(active) = active() {
            {render_active(active)}
        } else {
            div { class: "page page-loading", {t!("route-loading")} }
        }
    }
}

fn render_active(active: ActiveRoute) -> Element {
    match active.view() {
        Some(ViewTarget::ListView) => rsx! { ListView {} },
        Some(ViewTarget::Login) => rsx! { Login {} },
        Some(ViewTarget::Home) => rsx! { Home {} },
        Some(ViewTarget::ClassicView) => match active.data.get("view") {
            Some(ResolvedValue::View(context)) => rsx! {
                ClassicView { context: context.clone() }
            },
            _ => rsx! {
                section { class: "page page-error", h1 { {t!("route-failed")} } }
            },
        },
        None => rsx! {},
    }
}
