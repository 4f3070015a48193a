//! The bundle of stores and the backend shared by every route.
//!
//! Platforms build one [`AppServices`] at startup and hand it to the component
//! tree as context; resolvers keep their own clone. Every field is a cheap
//! `Rc` handle, so clones observe the same state.

use std::rc::Rc;

use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;
use tracing::debug;

use crate::core::backend::{Backend, EmbeddedBackend, NavigationModule};
use crate::core::config::SystemConfigStore;
use crate::core::language::LanguageStore;
use crate::core::list_view::ListViewStore;
use crate::core::metadata::{ListViewMeta, MetadataStore};
use crate::core::preferences::{AuthSession, UserPreferenceStore};
use crate::core::reactive::Source;
use crate::core::record::Record;
use crate::core::screen::ScreenSizeObserver;
use crate::error::{BackendError, ConfigError};

/// One module's list metadata together with its first page of records.
#[derive(Debug, Clone, PartialEq)]
pub struct ModulePage {
    pub module: String,
    pub meta: ListViewMeta,
    pub records: Vec<Record>,
}

#[derive(Clone)]
pub struct AppServices {
    pub backend: Rc<dyn Backend>,
    pub config: Rc<SystemConfigStore>,
    pub language: LanguageStore,
    pub metadata: MetadataStore,
    pub list_view: ListViewStore,
    pub screen: ScreenSizeObserver,
    pub preferences: UserPreferenceStore,
    pub session: AuthSession,
    pub navigation: Source<Vec<NavigationModule>>,
}

impl AppServices {
    pub fn new(backend: Rc<dyn Backend>, config: SystemConfigStore) -> Self {
        let language = LanguageStore::new();
        Self {
            backend,
            config: Rc::new(config),
            list_view: ListViewStore::new(language.clone()),
            language,
            metadata: MetadataStore::new(),
            screen: ScreenSizeObserver::default(),
            preferences: UserPreferenceStore::new(),
            session: AuthSession::new(),
            navigation: Source::new(),
        }
    }

    /// Services over the bundled fixtures and embedded system config.
    pub fn embedded() -> Result<Self, ConfigError> {
        Ok(Self::new(
            Rc::new(EmbeddedBackend::new()),
            SystemConfigStore::embedded()?,
        ))
    }

    /// Module the static list route shows: user preference, then config.
    pub fn list_module(&self) -> Option<String> {
        self.preferences
            .current()
            .list_module
            .or_else(|| self.config.default_module().map(str::to_string))
    }

    /// Fetch a module's list metadata and records without touching the stores.
    pub fn fetch_module(&self, module: &str) -> LocalBoxFuture<'static, Result<ModulePage, BackendError>> {
        let fetch = future::try_join(
            self.backend.list_metadata(module),
            self.backend.list_records(module),
        );
        let module = module.to_string();

        async move {
            let (meta, records) = fetch.await?;
            debug!(module = %module, fields = meta.fields.len(), "list metadata fetched");
            Ok(ModulePage {
                module,
                meta,
                records,
            })
        }
        .boxed_local()
    }

    /// Publish a fetched page to the metadata and list-view stores.
    pub fn commit_module(&self, page: &ModulePage) {
        self.metadata.set_list_metadata(page.meta.clone());
        self.list_view.set_records(&page.module, page.records.clone());
    }

    /// [`fetch_module`](Self::fetch_module) then [`commit_module`](Self::commit_module).
    pub fn load_module(&self, module: &str) -> LocalBoxFuture<'static, Result<ListViewMeta, BackendError>> {
        let fetch = self.fetch_module(module);
        let services = self.clone();

        async move {
            let page = fetch.await?;
            services.commit_module(&page);
            Ok(page.meta)
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn load_module_fills_stores() {
        let services = AppServices::embedded().unwrap();
        let meta = block_on(services.load_module("Accounts")).unwrap();

        assert_eq!(services.metadata.list_metadata().get(), Some(meta));
        assert_eq!(services.list_view.app_state().module, "Accounts");
        assert!(!services.list_view.records().get().unwrap().is_empty());
    }

    #[test]
    fn fetch_module_leaves_stores_cold() {
        let services = AppServices::embedded().unwrap();
        let page = block_on(services.fetch_module("Leads")).unwrap();

        assert_eq!(page.module, "Leads");
        assert!(!page.records.is_empty());
        assert!(!services.metadata.list_metadata().has_value());
        assert!(!services.list_view.records().has_value());

        services.commit_module(&page);
        assert_eq!(services.list_view.app_state().module, "Leads");
    }

    #[test]
    fn list_module_prefers_user_preference() {
        let services = AppServices::embedded().unwrap();
        assert_eq!(services.list_module().as_deref(), Some("Accounts"));

        let mut prefs = services.preferences.current();
        prefs.list_module = Some("Leads".into());
        services.preferences.set(prefs);
        assert_eq!(services.list_module().as_deref(), Some("Leads"));
    }
}
