//! Per-column sort accessors over the list-view store.

use crate::core::list_view::{ListViewStore, SortDirection, SortingSelection};
use crate::core::metadata::ColumnDefinition;
use crate::core::reactive::Mapped;

/// Sort state of one column header, backed by the list-view store.
#[derive(Debug, Clone)]
pub struct FieldSort {
    field: String,
    sortable: bool,
    store: ListViewStore,
}

fn direction_for(sort: &SortingSelection, field: &str) -> SortDirection {
    match &sort.order_by {
        Some(order_by) if order_by == field => sort.sort_order,
        _ => SortDirection::None,
    }
}

impl FieldSort {
    pub fn new(column: &ColumnDefinition, store: ListViewStore) -> Self {
        Self {
            field: column.name.clone(),
            sortable: column.sortable,
            store,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn direction(&self) -> SortDirection {
        direction_for(&self.store.sort().get().unwrap_or_default(), &self.field)
    }

    /// Direction of this column as the sort changes.
    pub fn watch(&self) -> Mapped<SortDirection> {
        let field = self.field.clone();
        self.store
            .sort()
            .map(move |sort| direction_for(sort, &field))
    }

    pub fn change_sort_direction(&self, direction: SortDirection) {
        if self.sortable {
            self.store.update_sorting(&self.field, direction);
        }
    }

    /// Advance along none, ascending, descending.
    pub fn cycle(&self) {
        self.change_sort_direction(self.direction().next());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::language::LanguageStore;
    use crate::core::record::Record;

    fn store() -> ListViewStore {
        let store = ListViewStore::new(LanguageStore::new());
        store.set_records(
            "Accounts",
            vec![
                Record::new("a", "Accounts").with("name", "Zeta"),
                Record::new("b", "Accounts").with("name", "Alpha"),
            ],
        );
        store
    }

    fn ids(store: &ListViewStore) -> Vec<String> {
        store.records().get().unwrap().into_iter().map(|r| r.id).collect()
    }

    #[test]
    fn cycling_reorders_page() {
        let store = store();
        let sort = FieldSort::new(&ColumnDefinition::new("name"), store.clone());
        assert_eq!(sort.direction(), SortDirection::None);

        sort.cycle();
        assert_eq!(sort.direction(), SortDirection::Asc);
        assert_eq!(ids(&store), ["b", "a"]);

        sort.cycle();
        assert_eq!(sort.direction(), SortDirection::Desc);
        assert_eq!(ids(&store), ["a", "b"]);

        sort.cycle();
        assert_eq!(sort.direction(), SortDirection::None);
        assert_eq!(ids(&store), ["a", "b"]);
    }

    #[test]
    fn other_column_reads_as_unsorted() {
        let store = store();
        let name = FieldSort::new(&ColumnDefinition::new("name"), store.clone());
        let city = FieldSort::new(&ColumnDefinition::new("city"), store);
        let watched = city.watch();

        name.change_sort_direction(SortDirection::Desc);
        assert_eq!(city.direction(), SortDirection::None);
        assert_eq!(watched.get(), Some(SortDirection::None));

        city.change_sort_direction(SortDirection::Asc);
        assert_eq!(watched.get(), Some(SortDirection::Asc));
        assert_eq!(name.direction(), SortDirection::None);
    }

    #[test]
    fn unsortable_column_ignores_changes() {
        let store = store();
        let mut column = ColumnDefinition::new("name");
        column.sortable = false;
        let sort = FieldSort::new(&column, store);

        sort.cycle();
        assert_eq!(sort.direction(), SortDirection::None);
    }
}
