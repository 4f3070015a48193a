use dioxus::prelude::*;

use crate::core::record::FieldManager;
use crate::routing::redirect::redirect;
use crate::routing::resolve::ViewContext;
use crate::services::AppServices;
use crate::t;
use crate::table::TableBody;

/// Module routes (`/:module[/:action[/:record]]`). A record id shows the
/// record's fields; otherwise the module's list is shown.
#[component]
pub fn ClassicView(context: ViewContext) -> Element {
    let services = use_context::<AppServices>();
    let module_label = services.language.module_label(&context.module);
    let action = context.action.clone().unwrap_or_else(|| "list".to_string());

    let Some(record_id) = context.record.clone() else {
        return rsx! {
            section { class: "page classic-view",
                header { class: "classic-view__header",
                    h1 { "{module_label}" }
                    span { class: "classic-view__action", "{action}" }
                }
                TableBody {}
            }
        };
    };

    let record = services
        .list_view
        .records()
        .get()
        .unwrap_or_default()
        .into_iter()
        .find(|record| record.id == record_id);
    let strings = services.language.current();
    let back = format!("/{}", context.module);

    let rows: Vec<(String, String, String)> = match &record {
        Some(record) => context
            .meta
            .fields
            .iter()
            .map(|column| {
                let label = services.language.get_field_label(
                    column.label.as_deref().unwrap_or(&column.name),
                    &context.module,
                    &strings,
                );
                let value = FieldManager::build_field(record, column).display();
                (column.name.clone(), label, value)
            })
            .collect(),
        None => Vec::new(),
    };

    rsx! {
        section { class: "page classic-view",
            header { class: "classic-view__header",
                h1 { "{module_label}" }
                span { class: "classic-view__action", "{action}" }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: move |_| redirect(&back),
                    {t!("classic-back")}
                }
            }
            if record.is_none() {
                p { class: "classic-view__missing", {t!("classic-record-missing", id = record_id)} }
            } else {
                dl { class: "classic-view__fields",
                    for (name, label, value) in rows {
                        div { key: "{name}", class: "classic-view__field",
                            dt { "{label}" }
                            dd { "{value}" }
                        }
                    }
                }
            }
        }
    }
}
