//! Records returned by list queries and the per-cell field view built from them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::format;
use super::metadata::ColumnDefinition;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            module: module.into(),
            attributes: Map::new(),
        }
    }

    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    /// Attribute rendered as plain text; null or missing is empty.
    pub fn attribute_text(&self, name: &str) -> String {
        match self.attributes.get(name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => other.to_string(),
        }
    }
}

/// One table cell: a record attribute paired with its column definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub field_type: String,
    pub value: String,
    pub label: Option<String>,
    pub link: bool,
    pub record_id: String,
    pub module: String,
}

impl Field {
    pub fn display(&self) -> String {
        match self.field_type.as_str() {
            "bool" => match self.value.as_str() {
                "" => String::new(),
                "1" | "true" => format::format_bool(true).to_string(),
                _ => format::format_bool(false).to_string(),
            },
            "currency" | "decimal" => self
                .value
                .parse::<f64>()
                .map(format::format_currency)
                .unwrap_or_else(|_| self.value.clone()),
            "date" | "datetime" => format::format_date(&self.value),
            _ => self.value.clone(),
        }
    }

    /// Hash route to the record's detail view, for link fields.
    pub fn link_target(&self) -> Option<String> {
        if self.link && !self.record_id.is_empty() {
            Some(format!("/{}/detail/{}", self.module, self.record_id))
        } else {
            None
        }
    }
}

pub struct FieldManager;

impl FieldManager {
    pub fn build_field(record: &Record, column: &ColumnDefinition) -> Field {
        Field {
            name: column.name.clone(),
            field_type: column
                .field_type
                .clone()
                .unwrap_or_else(|| "varchar".to_string()),
            value: record.attribute_text(&column.name),
            label: column.label.clone(),
            link: column.link,
            record_id: record.id.clone(),
            module: record.module.clone(),
        }
    }
}
