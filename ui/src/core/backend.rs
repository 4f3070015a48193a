//! Data backend seam.
//!
//! Resolvers and views fetch through [`Backend`]; the bundled
//! [`EmbeddedBackend`] answers from JSON fixtures compiled into the binary so
//! the client runs without a server.

use std::collections::BTreeMap;

use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::language::LanguageStrings;
use super::metadata::ListViewMeta;
use super::preferences::UserPreferences;
use super::record::Record;
use crate::error::BackendError;

pub type BackendFuture<T> = LocalBoxFuture<'static, Result<T, BackendError>>;

/// Module entry in the main navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationModule {
    pub name: String,
    #[serde(default)]
    pub label_key: Option<String>,
}

pub trait Backend {
    fn language_strings(&self) -> BackendFuture<LanguageStrings>;
    fn navigation(&self) -> BackendFuture<Vec<NavigationModule>>;
    fn list_metadata(&self, module: &str) -> BackendFuture<ListViewMeta>;
    fn list_records(&self, module: &str) -> BackendFuture<Vec<Record>>;
    fn user_preferences(&self) -> BackendFuture<UserPreferences>;
}

const LANGUAGE_JSON: &str = include_str!("../../assets/demo/language.json");
const NAVIGATION_JSON: &str = include_str!("../../assets/demo/navigation.json");
const PREFERENCES_JSON: &str = include_str!("../../assets/demo/preferences.json");
const MODULES_JSON: &str = include_str!("../../assets/demo/modules.json");

#[derive(Debug, Clone, Deserialize)]
struct ModuleFixture {
    metadata: ListViewMeta,
    #[serde(default)]
    records: Vec<Record>,
}

#[derive(Debug, Clone, Default)]
pub struct EmbeddedBackend;

impl EmbeddedBackend {
    pub fn new() -> Self {
        Self
    }

    fn module(module: &str) -> Result<ModuleFixture, BackendError> {
        let mut modules: BTreeMap<String, ModuleFixture> = decode("module fixtures", MODULES_JSON)?;
        modules
            .remove(module)
            .ok_or_else(|| BackendError::UnknownModule(module.to_string()))
    }
}

fn decode<T: DeserializeOwned>(what: &str, raw: &str) -> Result<T, BackendError> {
    serde_json::from_str(raw).map_err(|err| BackendError::Decode {
        what: what.to_string(),
        message: err.to_string(),
    })
}

fn ready<T: 'static>(result: Result<T, BackendError>) -> BackendFuture<T> {
    future::ready(result).boxed_local()
}

impl Backend for EmbeddedBackend {
    fn language_strings(&self) -> BackendFuture<LanguageStrings> {
        ready(decode("language strings", LANGUAGE_JSON))
    }

    fn navigation(&self) -> BackendFuture<Vec<NavigationModule>> {
        ready(decode("navigation", NAVIGATION_JSON))
    }

    fn list_metadata(&self, module: &str) -> BackendFuture<ListViewMeta> {
        ready(Self::module(module).map(|fixture| fixture.metadata))
    }

    fn list_records(&self, module: &str) -> BackendFuture<Vec<Record>> {
        let owner = module.to_string();
        ready(Self::module(module).map(|fixture| {
            fixture
                .records
                .into_iter()
                .map(|mut record| {
                    if record.module.is_empty() {
                        record.module = owner.clone();
                    }
                    record
                })
                .collect()
        }))
    }

    fn user_preferences(&self) -> BackendFuture<UserPreferences> {
        ready(decode("user preferences", PREFERENCES_JSON))
    }
}
