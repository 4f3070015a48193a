//! Server-supplied CRM language strings.
//!
//! These are distinct from the Fluent bundles in [`crate::i18n`], which only
//! cover the client's own chrome. Labels for fields, modules and list options
//! come from the backend and are looked up here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::reactive::Source;

pub type StringMap = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageStrings {
    #[serde(default)]
    pub language_key: String,
    #[serde(default)]
    pub app_strings: StringMap,
    #[serde(default)]
    pub app_list_strings: BTreeMap<String, StringMap>,
    #[serde(default)]
    pub mod_strings: BTreeMap<String, StringMap>,
}

impl LanguageStrings {
    /// Keep only the string groups named in `types`
    /// (`appStrings`, `appListStrings`, `modStrings`).
    pub fn restricted_to(mut self, types: &[&str]) -> Self {
        if !types.contains(&"appStrings") {
            self.app_strings.clear();
        }
        if !types.contains(&"appListStrings") {
            self.app_list_strings.clear();
        }
        if !types.contains(&"modStrings") {
            self.mod_strings.clear();
        }
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct LanguageStore {
    strings: Source<LanguageStrings>,
}

impl LanguageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vm(&self) -> &Source<LanguageStrings> {
        &self.strings
    }

    pub fn current(&self) -> LanguageStrings {
        self.strings.get().unwrap_or_default()
    }

    pub fn set(&self, strings: LanguageStrings) {
        self.strings.set(strings);
    }

    /// Resolve a field label: module strings first, then application strings,
    /// then the raw label key.
    pub fn get_field_label(&self, label: &str, module: &str, languages: &LanguageStrings) -> String {
        languages
            .mod_strings
            .get(module)
            .and_then(|strings| strings.get(label))
            .filter(|value| !value.is_empty())
            .or_else(|| languages.app_strings.get(label))
            .filter(|value| !value.is_empty())
            .cloned()
            .unwrap_or_else(|| label.to_string())
    }

    /// Display name from `appListStrings.moduleList`, falling back to the module key.
    pub fn module_label(&self, module: &str) -> String {
        self.strings
            .get()
            .and_then(|strings| {
                strings
                    .app_list_strings
                    .get("moduleList")
                    .and_then(|list| list.get(module).cloned())
            })
            .unwrap_or_else(|| module.to_string())
    }

    pub fn get_app_string(&self, key: &str) -> Option<String> {
        self.strings
            .get()
            .and_then(|strings| strings.app_strings.get(key).cloned())
    }
}
