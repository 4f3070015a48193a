use dioxus::prelude::*;
use tracing::{debug, warn};

use crate::hooks::use_source;
use crate::services::AppServices;
use crate::t;
use crate::table::TableBody;

/// Static list route: the preferred (or configured default) module's records.
#[component]
pub fn ListView() -> Element {
    let services = use_context::<AppServices>();

    use_hook({
        let services = services.clone();
        move || {
            let shown = services.preferences.current().show_sidebar_widgets;
            services.list_view.set_widgets(shown);
        }
    });

    let load = {
        let services = services.clone();
        use_resource(move || {
            let services = services.clone();
            async move {
                let Some(module) = services.list_module() else {
                    warn!("no list module configured");
                    return Err(t!("list-no-module"));
                };
                services
                    .load_module(&module)
                    .await
                    .map(|meta| {
                        debug!(%module, columns = meta.fields.len(), "list view loaded");
                        module
                    })
                    .map_err(|err| err.to_string())
            }
        })
    };

    let widgets = use_source(services.list_view.widgets());
    let selection = use_source(services.list_view.selection());
    let records = use_source(services.list_view.records());

    let show_widgets = widgets().unwrap_or(true);
    let selected = selection().map(|s| s.count).unwrap_or_default();
    let total = records().map(|r| r.len()).unwrap_or_default();

    let title = match &*load.read() {
        Some(Ok(module)) => services.language.module_label(module),
        _ => t!("list-title"),
    };
    let failure = match &*load.read() {
        Some(Err(message)) => Some(message.clone()),
        _ => None,
    };

    let list_view = services.list_view.clone();
    let layout_class = if show_widgets {
        "list-view list-view--with-sidebar"
    } else {
        "list-view"
    };

    rsx! {
        section { class: "page {layout_class}",
            header { class: "list-view__header",
                h1 { class: "list-view__title", "{title}" }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    aria_pressed: show_widgets,
                    onclick: move |_| list_view.toggle_widgets(),
                    if show_widgets { {t!("list-hide-widgets")} } else { {t!("list-show-widgets")} }
                }
            }
            if let Some(message) = failure {
                p { class: "list-view__error", role: "alert", "{message}" }
            }
            div { class: "list-view__body",
                div { class: "list-view__table", TableBody {} }
                if show_widgets {
                    aside { class: "list-view__widgets",
                        div { class: "widget",
                            span { class: "widget__label", {t!("list-widget-records")} }
                            span { class: "widget__value", "{total}" }
                        }
                        div { class: "widget",
                            span { class: "widget__label", {t!("list-widget-selected")} }
                            span { class: "widget__value", "{selected}" }
                        }
                    }
                }
            }
        }
    }
}
