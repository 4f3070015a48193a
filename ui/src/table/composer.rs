//! Combines the list-view stores into the table body view-model.
//!
//! The model is only published once every input has produced a value, and
//! after that on every emission of any input. Column layout is recomputed on
//! each emission; the [`TableColumns`] state is carried between emissions so a
//! viewport without a configured limit keeps the previous budget.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use tracing::{debug, trace};

use super::columns::TableColumns;
use super::sort::FieldSort;
use crate::core::config::ColumnLimits;
use crate::core::language::{LanguageStore, LanguageStrings};
use crate::core::list_view::{ListViewStore, RecordSelection, SelectionStatus};
use crate::core::metadata::{ColumnDefinition, LineAction, ListViewMeta};
use crate::core::reactive::{Source, Subscription, Subscriptions};
use crate::core::record::{Field, FieldManager, Record};
use crate::core::screen::ScreenSize;
use crate::error::ConfigError;
use crate::services::AppServices;

#[derive(Debug, Clone, PartialEq)]
pub struct TableBodyModel {
    pub language: LanguageStrings,
    pub list_metadata: ListViewMeta,
    pub selected: BTreeSet<String>,
    pub selection_status: SelectionStatus,
    pub displayed_columns: Vec<String>,
    pub records: Vec<Record>,
}

impl TableBodyModel {
    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.list_metadata.column(name)
    }
}

/// The upstreams the body model is derived from.
#[derive(Clone)]
pub struct TableSources {
    pub language: Source<LanguageStrings>,
    pub list_metadata: Source<ListViewMeta>,
    pub selection: Source<RecordSelection>,
    pub screen_size: Source<ScreenSize>,
    pub widgets: Source<bool>,
    pub records: Source<Vec<Record>>,
}

impl TableSources {
    pub fn from_services(services: &AppServices) -> Self {
        Self {
            language: services.language.vm().clone(),
            list_metadata: services.metadata.list_metadata().clone(),
            selection: services.list_view.selection().clone(),
            screen_size: services.screen.screen_size().clone(),
            widgets: services.list_view.widgets().clone(),
            records: services.list_view.records().clone(),
        }
    }
}

#[derive(Default)]
struct Latest {
    language: Option<LanguageStrings>,
    list_metadata: Option<ListViewMeta>,
    selection: Option<RecordSelection>,
    screen_size: Option<ScreenSize>,
    widgets: Option<bool>,
    records: Option<Vec<Record>>,
}

struct ComposerState {
    latest: Latest,
    columns: TableColumns,
    limits: Option<ColumnLimits>,
}

impl ComposerState {
    fn project(&mut self) -> Option<TableBodyModel> {
        let latest = &self.latest;
        let (
            Some(language),
            Some(meta),
            Some(selection),
            Some(screen),
            Some(widgets),
            Some(records),
        ) = (
            &latest.language,
            &latest.list_metadata,
            &latest.selection,
            latest.screen_size,
            latest.widgets,
            &latest.records,
        )
        else {
            trace!("table body inputs incomplete");
            return None;
        };

        self.columns.screen = screen;
        self.columns.calculate_max_columns(widgets, self.limits.as_ref());

        Some(TableBodyModel {
            language: language.clone(),
            displayed_columns: self.columns.build_display_columns(meta),
            list_metadata: meta.clone(),
            selected: selection.selected.clone(),
            selection_status: selection.status,
            records: records.clone(),
        })
    }
}

fn recompute(state: &RefCell<ComposerState>, output: &Source<TableBodyModel>) {
    let model = state.borrow_mut().project();
    if let Some(model) = model {
        output.set(model);
    }
}

fn wire<T: Clone + 'static>(
    source: &Source<T>,
    state: &Rc<RefCell<ComposerState>>,
    output: &Source<TableBodyModel>,
    store: fn(&mut Latest, T),
) -> Subscription {
    let state = state.clone();
    let output = output.clone();
    source.subscribe(move |value| {
        store(&mut state.borrow_mut().latest, value.clone());
        recompute(&state, &output);
    })
}

/// View-model of the list table body. Holds its upstream subscriptions until
/// dropped.
pub struct TableBodyComposer {
    vm: Source<TableBodyModel>,
    state: Rc<RefCell<ComposerState>>,
    store: ListViewStore,
    language: LanguageStore,
    subscriptions: Subscriptions,
}

impl TableBodyComposer {
    pub fn new(services: &AppServices) -> Result<Self, ConfigError> {
        let limits = services.config.column_limits()?;
        Ok(Self::connect(
            TableSources::from_services(services),
            services.list_view.clone(),
            services.language.clone(),
            limits,
        ))
    }

    pub fn connect(
        sources: TableSources,
        store: ListViewStore,
        language: LanguageStore,
        limits: Option<ColumnLimits>,
    ) -> Self {
        let vm = Source::new();
        let state = Rc::new(RefCell::new(ComposerState {
            latest: Latest::default(),
            columns: TableColumns::default(),
            limits,
        }));

        let mut subscriptions = Subscriptions::new();
        subscriptions.push(wire(&sources.language, &state, &vm, |l, v| {
            l.language = Some(v)
        }));
        subscriptions.push(wire(&sources.list_metadata, &state, &vm, |l, v| {
            l.list_metadata = Some(v)
        }));
        subscriptions.push(wire(&sources.selection, &state, &vm, |l, v| {
            l.selection = Some(v)
        }));
        subscriptions.push(wire(&sources.screen_size, &state, &vm, |l, v| {
            l.screen_size = Some(v)
        }));
        subscriptions.push(wire(&sources.widgets, &state, &vm, |l, v| {
            l.widgets = Some(v)
        }));
        subscriptions.push(wire(&sources.records, &state, &vm, |l, v| {
            l.records = Some(v)
        }));
        debug!(has_model = vm.has_value(), "table body composer connected");

        Self {
            vm,
            state,
            store,
            language,
            subscriptions,
        }
    }

    pub fn vm(&self) -> &Source<TableBodyModel> {
        &self.vm
    }

    pub fn model(&self) -> Option<TableBodyModel> {
        self.vm.get()
    }

    pub fn columns(&self) -> TableColumns {
        self.state.borrow().columns
    }

    pub fn toggle_selection(&self, id: &str) {
        self.store.toggle_selection(id);
    }

    /// Header checkbox: select the whole page, or clear when it already is.
    pub fn toggle_all(&self) {
        let all = self
            .store
            .selection()
            .get()
            .is_some_and(|selection| Self::all_selected(selection.status));
        if all {
            self.store.clear_selection();
        } else {
            self.store.select_page();
        }
    }

    pub fn all_selected(status: SelectionStatus) -> bool {
        status == SelectionStatus::All
    }

    pub fn get_field_label(&self, label: &str) -> String {
        let module = self.store.app_state().module;
        self.language
            .get_field_label(label, &module, &self.store.app_data())
    }

    /// Label for a line-action button; actions without a label key show their key.
    pub fn get_line_action_label(&self, action: &LineAction) -> String {
        self.get_field_label(action.label_key.as_deref().unwrap_or(&action.key))
    }

    pub fn get_field(&self, column: &ColumnDefinition, record: &Record) -> Field {
        FieldManager::build_field(record, column)
    }

    pub fn get_field_sort(&self, column: &ColumnDefinition) -> FieldSort {
        FieldSort::new(column, self.store.clone())
    }

    /// Detach from every upstream. The last model stays readable.
    pub fn disconnect(&mut self) {
        self.subscriptions.clear();
    }

    pub fn is_connected(&self) -> bool {
        !self.subscriptions.is_empty()
    }
}
