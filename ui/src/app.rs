//! Root context: shared services plus the navigator, provided to every route.

use dioxus::prelude::*;
use tracing::{error, info};

use crate::error::StartupError;
use crate::routing::{Navigator, ResolverRegistry, RouteTable};
use crate::services::AppServices;
use crate::t;

#[derive(Clone)]
pub struct AppContext {
    pub services: AppServices,
    pub navigator: Navigator,
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        self.navigator.ptr_eq(&other.navigator)
    }
}

impl AppContext {
    pub fn new(services: AppServices) -> Result<Self, StartupError> {
        let navigator = Navigator::new(
            RouteTable::app()?,
            ResolverRegistry::for_services(&services),
        );
        Ok(Self {
            services,
            navigator,
        })
    }

    /// Context over the bundled demo backend.
    pub fn embedded() -> Result<Self, StartupError> {
        let context = Self::new(AppServices::embedded()?)?;
        let routes = context.navigator.table().entries().len();
        info!(routes, "application context ready");
        Ok(context)
    }
}

/// Builds the [`AppContext`] once and provides it to `children`.
#[component]
pub fn AppRoot(children: Element) -> Element {
    let context = use_hook(|| {
        AppContext::embedded().map_err(|err| {
            error!(%err, "application startup failed");
            err.to_string()
        })
    });

    match context {
        Ok(context) => rsx! {
            ContextScope { context, {children} }
        },
        Err(message) => rsx! {
            section { class: "page page-error",
                h1 { {t!("startup-failed")} }
                p { class: "page-error__detail", "{message}" }
            }
        },
    }
}

#[component]
fn ContextScope(context: AppContext, children: Element) -> Element {
    let services = use_context_provider(|| context.services.clone());
    use_context_provider(|| context.navigator.clone());

    let on_resize = move |evt: Event<ResizeData>| {
        if let Ok(size) = evt.data().get_border_box_size() {
            services.screen.observe_width(size.width);
        }
    };

    rsx! {
        div { class: "app-shell", onresize: on_resize, {children} }
    }
}
