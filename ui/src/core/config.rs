//! System configuration store.
//!
//! Configuration arrives as a JSON object of named values. The app ships an
//! embedded default (`assets/config/system-config.json`); callers that have a
//! server-provided document use [`SystemConfigStore::from_json`].

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::screen::ScreenSize;
use crate::error::ConfigError;

const EMBEDDED_CONFIG: &str = include_str!("../../assets/config/system-config.json");

pub const COLUMN_LIMITS_KEY: &str = "listview_column_limits";
pub const DEFAULT_MODULE_KEY: &str = "default_module";

/// Per-viewport column limits, split by sidebar visibility.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ColumnLimits {
    #[serde(default)]
    pub with_sidebar: BTreeMap<ScreenSize, usize>,
    #[serde(default)]
    pub without_sidebar: BTreeMap<ScreenSize, usize>,
}

impl ColumnLimits {
    pub fn table(&self, sidebar: bool) -> &BTreeMap<ScreenSize, usize> {
        if sidebar {
            &self.with_sidebar
        } else {
            &self.without_sidebar
        }
    }

    pub fn limit_for(&self, sidebar: bool, screen: ScreenSize) -> Option<usize> {
        self.table(sidebar).get(&screen).copied()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SystemConfigStore {
    values: Map<String, Value>,
}

impl SystemConfigStore {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let values = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        Ok(Self { values })
    }

    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json(EMBEDDED_CONFIG)
    }

    pub fn get_config_value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set_config_value(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// `None` when the breakpoint table is absent.
    pub fn column_limits(&self) -> Result<Option<ColumnLimits>, ConfigError> {
        self.get_config_value(COLUMN_LIMITS_KEY)
            .map(|value| {
                ColumnLimits::deserialize(value).map_err(|source| ConfigError::InvalidValue {
                    key: COLUMN_LIMITS_KEY,
                    source,
                })
            })
            .transpose()
    }

    pub fn default_module(&self) -> Option<&str> {
        self.get_config_value(DEFAULT_MODULE_KEY)
            .and_then(Value::as_str)
    }
}
