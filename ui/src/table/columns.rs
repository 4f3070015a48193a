//! Displayed-column derivation for the list table.

use tracing::debug;

use crate::core::config::ColumnLimits;
use crate::core::metadata::ListViewMeta;
use crate::core::screen::ScreenSize;

pub const CHECKBOX_COLUMN: &str = "checkbox";
pub const LINE_ACTIONS_COLUMN: &str = "line-actions";

const DEFAULT_MAX_COLUMNS: usize = 5;

/// Column budget for the current viewport. `screen` and `max_columns` persist
/// between recomputations: a viewport with no configured limit keeps whatever
/// budget the previous one had.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableColumns {
    pub screen: ScreenSize,
    pub max_columns: usize,
}

impl Default for TableColumns {
    fn default() -> Self {
        Self {
            screen: ScreenSize::Medium,
            max_columns: DEFAULT_MAX_COLUMNS,
        }
    }
}

impl TableColumns {
    /// Adopt the breakpoint limit for `screen` in the sidebar or no-sidebar
    /// table. Missing (or zero) limits leave `max_columns` untouched.
    pub fn calculate_max_columns(&mut self, sidebar: bool, limits: Option<&ColumnLimits>) {
        match limits.and_then(|limits| limits.limit_for(sidebar, self.screen)) {
            Some(limit) if limit > 0 => self.max_columns = limit,
            _ => debug!(
                screen = self.screen.as_str(),
                sidebar,
                kept = self.max_columns,
                "no column limit configured, keeping previous"
            ),
        }
    }

    /// `checkbox`, up to `max_columns` field names, then `line-actions` when
    /// the metadata declares any. If the cut drops every link field, the first
    /// link field past the cut replaces the last kept column.
    pub fn build_display_columns(&self, meta: &ListViewMeta) -> Vec<String> {
        let mut columns = vec![CHECKBOX_COLUMN.to_string()];

        let taken = self.max_columns.min(meta.fields.len());
        let mut has_link = false;
        for field in &meta.fields[..taken] {
            columns.push(field.name.clone());
            has_link |= field.link;
        }

        if !has_link && taken > 0 && self.max_columns < meta.fields.len() {
            if let Some(link) = meta.fields[taken..].iter().find(|field| field.link) {
                columns.pop();
                columns.push(link.name.clone());
            }
        }

        if !meta.line_actions.is_empty() {
            columns.push(LINE_ACTIONS_COLUMN.to_string());
        }
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::{ColumnDefinition, LineAction};
    use std::collections::BTreeMap;

    fn meta(fields: &[(&str, bool)], actions: usize) -> ListViewMeta {
        ListViewMeta {
            fields: fields
                .iter()
                .map(|(name, link)| {
                    let column = ColumnDefinition::new(*name);
                    if *link {
                        column.linked()
                    } else {
                        column
                    }
                })
                .collect(),
            line_actions: (0..actions)
                .map(|i| LineAction {
                    key: format!("action-{i}"),
                    ..Default::default()
                })
                .collect(),
        }
    }

    fn columns(max_columns: usize) -> TableColumns {
        TableColumns {
            screen: ScreenSize::Medium,
            max_columns,
        }
    }

    #[test]
    fn link_field_past_the_cut_replaces_last_column() {
        let meta = meta(
            &[("A", false), ("B", false), ("C", false), ("D", false), ("E", false), ("F", true)],
            0,
        );
        assert_eq!(
            columns(5).build_display_columns(&meta),
            ["checkbox", "A", "B", "C", "D", "F"]
        );
    }

    #[test]
    fn short_metadata_is_not_truncated() {
        let meta = meta(&[("A", false), ("B", false), ("C", false)], 0);
        assert_eq!(columns(5).build_display_columns(&meta), ["checkbox", "A", "B", "C"]);
    }

    #[test]
    fn line_actions_column_is_appended() {
        let meta = meta(&[("A", true), ("B", false)], 2);
        assert_eq!(
            columns(5).build_display_columns(&meta),
            ["checkbox", "A", "B", "line-actions"]
        );
    }

    #[test]
    fn link_within_the_cut_needs_no_promotion() {
        let meta = meta(&[("A", false), ("B", true), ("C", false), ("D", true)], 0);
        assert_eq!(columns(2).build_display_columns(&meta), ["checkbox", "A", "B"]);
    }

    #[test]
    fn first_of_several_late_links_is_promoted() {
        let meta = meta(&[("A", false), ("B", false), ("C", true), ("D", true)], 0);
        assert_eq!(columns(2).build_display_columns(&meta), ["checkbox", "A", "C"]);
    }

    #[test]
    fn without_links_the_first_fields_are_kept() {
        let meta = meta(&[("A", false), ("B", false), ("C", false), ("D", false)], 0);
        assert_eq!(columns(3).build_display_columns(&meta), ["checkbox", "A", "B", "C"]);
    }

    #[test]
    fn zero_budget_or_no_fields_leaves_only_checkbox() {
        let linked = meta(&[("A", false), ("B", true)], 0);
        assert_eq!(columns(0).build_display_columns(&linked), ["checkbox"]);

        let empty = meta(&[], 0);
        assert_eq!(columns(5).build_display_columns(&empty), ["checkbox"]);
    }

    fn limits() -> ColumnLimits {
        ColumnLimits {
            with_sidebar: BTreeMap::from([(ScreenSize::Medium, 3), (ScreenSize::Large, 4)]),
            without_sidebar: BTreeMap::from([(ScreenSize::Medium, 5), (ScreenSize::Small, 0)]),
        }
    }

    #[test]
    fn limits_follow_sidebar_and_screen() {
        let limits = limits();
        let mut cols = TableColumns::default();

        cols.calculate_max_columns(true, Some(&limits));
        assert_eq!(cols.max_columns, 3);

        cols.calculate_max_columns(false, Some(&limits));
        assert_eq!(cols.max_columns, 5);

        cols.screen = ScreenSize::Large;
        cols.calculate_max_columns(true, Some(&limits));
        assert_eq!(cols.max_columns, 4);
    }

    #[test]
    fn missing_limit_keeps_previous_value() {
        let limits = limits();
        let mut cols = TableColumns {
            screen: ScreenSize::Large,
            max_columns: 4,
        };

        // no Large entry without sidebar
        cols.calculate_max_columns(false, Some(&limits));
        assert_eq!(cols.max_columns, 4);

        // zero is treated as absent
        cols.screen = ScreenSize::Small;
        cols.calculate_max_columns(false, Some(&limits));
        assert_eq!(cols.max_columns, 4);

        cols.calculate_max_columns(true, None);
        assert_eq!(cols.max_columns, 4);
    }

    #[test]
    fn calculation_is_idempotent() {
        let limits = limits();
        let mut once = TableColumns::default();
        once.calculate_max_columns(true, Some(&limits));
        let mut twice = once;
        twice.calculate_max_columns(true, Some(&limits));
        assert_eq!(once, twice);
    }
}
