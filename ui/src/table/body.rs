use std::rc::Rc;

use dioxus::prelude::*;
use futures_util::StreamExt;
use tracing::{debug, error};

use super::columns::{CHECKBOX_COLUMN, LINE_ACTIONS_COLUMN};
use super::composer::{TableBodyComposer, TableBodyModel, TableSources};
use crate::core::list_view::SortDirection;
use crate::core::record::Record;
use crate::hooks::use_source;
use crate::routing::redirect::redirect;
use crate::services::AppServices;
use crate::t;

#[derive(Debug, Clone)]
enum TableEvent {
    ToggleRow(String),
    ToggleAll,
    CycleSort(String),
    Open(String),
}

fn composer_for(services: &AppServices) -> TableBodyComposer {
    TableBodyComposer::new(services).unwrap_or_else(|err| {
        error!(%err, "column limits unreadable, using defaults");
        TableBodyComposer::connect(
            TableSources::from_services(services),
            services.list_view.clone(),
            services.language.clone(),
            None,
        )
    })
}

fn sort_marker(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::None => "",
        SortDirection::Asc => "▲",
        SortDirection::Desc => "▼",
    }
}

/// Records table of the list view.
#[component]
pub fn TableBody() -> Element {
    let services = use_context::<AppServices>();
    let composer = use_hook(|| Rc::new(composer_for(&services)));
    let model = use_source(composer.vm());

    let events = {
        let composer = composer.clone();
        use_coroutine(move |mut rx: UnboundedReceiver<TableEvent>| {
            let composer = composer.clone();
            async move {
                while let Some(event) = rx.next().await {
                    debug!(?event, "table event");
                    match event {
                        TableEvent::ToggleRow(id) => composer.toggle_selection(&id),
                        TableEvent::ToggleAll => composer.toggle_all(),
                        TableEvent::CycleSort(name) => {
                            let column = composer
                                .model()
                                .and_then(|model| model.column(&name).cloned());
                            if let Some(column) = column {
                                composer.get_field_sort(&column).cycle();
                            }
                        }
                        TableEvent::Open(url) => redirect(&url),
                    }
                }
            }
        })
    };

    let Some(model) = model() else {
        return rsx! {
            div { class: "list-table list-table--loading", {t!("list-loading")} }
        };
    };

    if model.records.is_empty() {
        return rsx! {
            div { class: "list-table list-table--empty", {t!("list-empty")} }
        };
    }

    let all_selected = TableBodyComposer::all_selected(model.selection_status);
    let headers = header_cells(&composer, &model);

    rsx! {
        div { class: "list-table",
            table { class: "list-table__grid",
                thead {
                    tr {
                        for header in headers {
                            {render_header(header, all_selected, events)}
                        }
                    }
                }
                tbody {
                    for record in model.records.iter() {
                        {render_row(&composer, &model, record, events)}
                    }
                }
            }
        }
    }
}

enum HeaderCell {
    Checkbox,
    Actions,
    Field {
        name: String,
        label: String,
        sortable: bool,
        direction: SortDirection,
    },
}

fn header_cells(composer: &TableBodyComposer, model: &TableBodyModel) -> Vec<HeaderCell> {
    model
        .displayed_columns
        .iter()
        .filter_map(|name| match name.as_str() {
            CHECKBOX_COLUMN => Some(HeaderCell::Checkbox),
            LINE_ACTIONS_COLUMN => Some(HeaderCell::Actions),
            _ => model.column(name).map(|column| {
                let sort = composer.get_field_sort(column);
                HeaderCell::Field {
                    name: column.name.clone(),
                    label: composer
                        .get_field_label(column.label.as_deref().unwrap_or(&column.name)),
                    sortable: sort.is_sortable(),
                    direction: sort.direction(),
                }
            }),
        })
        .collect()
}

fn render_header(cell: HeaderCell, all_selected: bool, events: Coroutine<TableEvent>) -> Element {
    match cell {
        HeaderCell::Checkbox => rsx! {
            th { class: "list-table__checkbox",
                input {
                    r#type: "checkbox",
                    aria_label: t!("list-select-all"),
                    checked: all_selected,
                    onchange: move |_| events.send(TableEvent::ToggleAll),
                }
            }
        },
        HeaderCell::Actions => rsx! {
            th { class: "list-table__actions" }
        },
        HeaderCell::Field {
            name,
            label,
            sortable,
            direction,
        } => {
            if !sortable {
                return rsx! {
                    th { key: "{name}", class: "list-table__header", "{label}" }
                };
            }
            let marker = sort_marker(direction);
            rsx! {
                th { key: "{name}", class: "list-table__header",
                    button {
                        r#type: "button",
                        class: "list-table__sort",
                        onclick: move |_| events.send(TableEvent::CycleSort(name.clone())),
                        "{label}"
                        span { class: "list-table__sort-marker", "{marker}" }
                    }
                }
            }
        }
    }
}

fn render_row(
    composer: &TableBodyComposer,
    model: &TableBodyModel,
    record: &Record,
    events: Coroutine<TableEvent>,
) -> Element {
    let selected = model.selected.contains(&record.id);
    let row_class = if selected {
        "list-table__row list-table__row--selected"
    } else {
        "list-table__row"
    };
    let cells: Vec<Element> = model
        .displayed_columns
        .iter()
        .map(|name| render_cell(composer, model, record, name, selected, events))
        .collect();

    rsx! {
        tr { key: "{record.id}", class: row_class,
            for cell in cells {
                {cell}
            }
        }
    }
}

fn render_cell(
    composer: &TableBodyComposer,
    model: &TableBodyModel,
    record: &Record,
    name: &str,
    selected: bool,
    events: Coroutine<TableEvent>,
) -> Element {
    match name {
        CHECKBOX_COLUMN => {
            let id = record.id.clone();
            rsx! {
                td { class: "list-table__checkbox",
                    input {
                        r#type: "checkbox",
                        checked: selected,
                        onchange: move |_| events.send(TableEvent::ToggleRow(id.clone())),
                    }
                }
            }
        }
        LINE_ACTIONS_COLUMN => {
            let actions: Vec<(String, String, String)> = model
                .list_metadata
                .line_actions
                .iter()
                .map(|action| {
                    (
                        action.key.clone(),
                        composer.get_line_action_label(action),
                        format!("/{}/{}/{}", record.module, action.key, record.id),
                    )
                })
                .collect();
            rsx! {
                td { class: "list-table__actions",
                    for (key, label, url) in actions {
                        button {
                            key: "{key}",
                            r#type: "button",
                            class: "button button--ghost list-table__action",
                            onclick: move |_| events.send(TableEvent::Open(url.clone())),
                            "{label}"
                        }
                    }
                }
            }
        }
        _ => {
            let Some(column) = model.column(name) else {
                return rsx! { td { class: "list-table__cell" } };
            };
            let field = composer.get_field(column, record);
            let text = field.display();
            match field.link_target() {
                Some(url) => rsx! {
                    td { class: "list-table__cell",
                        button {
                            r#type: "button",
                            class: "list-table__link",
                            onclick: move |_| events.send(TableEvent::Open(url.clone())),
                            "{text}"
                        }
                    }
                },
                None => rsx! {
                    td { class: "list-table__cell", "{text}" }
                },
            }
        }
    }
}
