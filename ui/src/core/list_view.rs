//! Shared list-view state: the loaded page of records, the selection, the sort
//! and the sidebar (widgets) toggle.
//!
//! The store is cloned into every component on the route. Each clone points at
//! the same sources; all mutation goes through the methods below so the
//! derived selection status never drifts from the record page.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::language::{LanguageStore, LanguageStrings};
use super::reactive::Source;
use super::record::Record;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SelectionStatus {
    #[default]
    None,
    Some,
    All,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSelection {
    pub all: bool,
    pub status: SelectionStatus,
    pub selected: BTreeSet<String>,
    pub count: usize,
}

impl RecordSelection {
    fn from_selected(selected: BTreeSet<String>, visible: &[Record]) -> Self {
        let status = if selected.is_empty() {
            SelectionStatus::None
        } else if !visible.is_empty() && visible.iter().all(|r| selected.contains(&r.id)) {
            SelectionStatus::All
        } else {
            SelectionStatus::Some
        };
        Self {
            all: status == SelectionStatus::All,
            status,
            count: selected.len(),
            selected,
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    None,
    Asc,
    Desc,
}

impl SortDirection {
    /// Header button cycle: none -> ascending -> descending -> none.
    pub fn next(self) -> Self {
        match self {
            SortDirection::None => SortDirection::Asc,
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortingSelection {
    pub order_by: Option<String>,
    pub sort_order: SortDirection,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub module: String,
}

#[derive(Debug, Clone)]
pub struct ListViewStore {
    records: Source<Vec<Record>>,
    loaded: Rc<RefCell<Vec<Record>>>,
    selection: Source<RecordSelection>,
    sort: Source<SortingSelection>,
    widgets: Source<bool>,
    app_state: Source<AppState>,
    language: LanguageStore,
}

impl ListViewStore {
    pub fn new(language: LanguageStore) -> Self {
        Self {
            records: Source::new(),
            loaded: Rc::new(RefCell::new(Vec::new())),
            selection: Source::with_value(RecordSelection::default()),
            sort: Source::with_value(SortingSelection::default()),
            widgets: Source::with_value(true),
            app_state: Source::with_value(AppState::default()),
            language,
        }
    }

    pub fn records(&self) -> &Source<Vec<Record>> {
        &self.records
    }

    pub fn selection(&self) -> &Source<RecordSelection> {
        &self.selection
    }

    pub fn sort(&self) -> &Source<SortingSelection> {
        &self.sort
    }

    /// Sidebar widget visibility.
    pub fn widgets(&self) -> &Source<bool> {
        &self.widgets
    }

    pub fn app_state(&self) -> AppState {
        self.app_state.get().unwrap_or_default()
    }

    /// Language strings the list is rendered with.
    pub fn app_data(&self) -> LanguageStrings {
        self.language.current()
    }

    pub fn language(&self) -> &LanguageStore {
        &self.language
    }

    /// Replace the loaded page. Selected ids that are no longer visible are dropped.
    pub fn set_records(&self, module: &str, records: Vec<Record>) {
        debug!(module, count = records.len(), "list records loaded");
        self.app_state.set(AppState {
            module: module.to_string(),
        });
        self.loaded.replace(records);

        let sorted = self.sorted_page();
        let kept: BTreeSet<String> = self
            .selection
            .get()
            .map(|sel| sel.selected)
            .unwrap_or_default()
            .into_iter()
            .filter(|id| sorted.iter().any(|r| &r.id == id))
            .collect();

        self.records.set(sorted);
        self.publish_selection(kept);
    }

    pub fn toggle_selection(&self, id: &str) {
        let page = self.records.get().unwrap_or_default();
        if !page.iter().any(|r| r.id == id) {
            debug!(id, "ignoring selection toggle for record outside the page");
            return;
        }

        let mut selected = self
            .selection
            .get()
            .map(|sel| sel.selected)
            .unwrap_or_default();
        if !selected.remove(id) {
            selected.insert(id.to_string());
        }
        self.publish_selection(selected);
    }

    pub fn select_page(&self) {
        let selected = self
            .records
            .get()
            .unwrap_or_default()
            .into_iter()
            .map(|r| r.id)
            .collect();
        self.publish_selection(selected);
    }

    pub fn clear_selection(&self) {
        self.publish_selection(BTreeSet::new());
    }

    /// Record the new sort and re-order the loaded page. `NONE` restores load order.
    pub fn update_sorting(&self, order_by: &str, sort_order: SortDirection) {
        debug!(order_by, ?sort_order, "list sort changed");
        self.sort.set(SortingSelection {
            order_by: Some(order_by.to_string()),
            sort_order,
        });
        if self.records.has_value() {
            self.records.set(self.sorted_page());
        }
    }

    pub fn toggle_widgets(&self) {
        let shown = self.widgets.get().unwrap_or(true);
        self.widgets.set(!shown);
    }

    pub fn set_widgets(&self, shown: bool) {
        if self.widgets.get() != Some(shown) {
            self.widgets.set(shown);
        }
    }

    fn publish_selection(&self, selected: BTreeSet<String>) {
        let page = self.records.get().unwrap_or_default();
        self.selection
            .set(RecordSelection::from_selected(selected, &page));
    }

    fn sorted_page(&self) -> Vec<Record> {
        let mut page = self.loaded.borrow().clone();
        let sort = self.sort.get().unwrap_or_default();
        if let Some(column) = sort.order_by.as_deref() {
            match sort.sort_order {
                SortDirection::None => {}
                SortDirection::Asc => page.sort_by(|a, b| compare_attribute(a, b, column)),
                SortDirection::Desc => page.sort_by(|a, b| compare_attribute(b, a, column)),
            }
        }
        page
    }
}

fn compare_attribute(a: &Record, b: &Record, column: &str) -> Ordering {
    let left = a.attribute_text(column);
    let right = b.attribute_text(column);
    match (left.parse::<f64>(), right.parse::<f64>()) {
        (Ok(l), Ok(r)) => l.partial_cmp(&r).unwrap_or(Ordering::Equal),
        _ => left.to_lowercase().cmp(&right.to_lowercase()),
    }
}
