//! List view metadata: which fields a module lists and which per-row actions
//! it offers. Read-only to the table layer.

use serde::{Deserialize, Serialize};

use super::reactive::Source;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Navigable field: the cell links to the record.
    #[serde(default)]
    pub link: bool,
    #[serde(default, rename = "type")]
    pub field_type: Option<String>,
    #[serde(default = "default_sortable")]
    pub sortable: bool,
}

fn default_sortable() -> bool {
    true
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sortable: true,
            ..Self::default()
        }
    }

    pub fn linked(mut self) -> Self {
        self.link = true;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAction {
    pub key: String,
    #[serde(default)]
    pub label_key: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListViewMeta {
    #[serde(default)]
    pub fields: Vec<ColumnDefinition>,
    #[serde(default)]
    pub line_actions: Vec<LineAction>,
}

impl ListViewMeta {
    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetadataStore {
    list_metadata: Source<ListViewMeta>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_metadata(&self) -> &Source<ListViewMeta> {
        &self.list_metadata
    }

    pub fn set_list_metadata(&self, meta: ListViewMeta) {
        self.list_metadata.set(meta);
    }
}
