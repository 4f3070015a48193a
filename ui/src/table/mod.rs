//! List table: column layout, the body view-model and its component.

pub mod body;
pub mod columns;
pub mod composer;
pub mod sort;

pub use body::TableBody;
pub use columns::TableColumns;
pub use composer::{TableBodyComposer, TableBodyModel, TableSources};
pub use sort::FieldSort;
