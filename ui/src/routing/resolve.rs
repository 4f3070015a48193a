//! Pre-activation work: resolvers fetch data, guards decide access.
//!
//! Resolving only fetches. The navigator hands each [`ResolvedValue`] back to
//! [`Resolver::commit`] once the navigation is known to still be current, so a
//! superseded navigation never writes to the shared stores.

use std::collections::BTreeMap;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use tracing::debug;

use super::table::{GuardKind, ResolverKind, RouteMatch};
use crate::core::backend::NavigationModule;
use crate::core::language::LanguageStrings;
use crate::core::metadata::ListViewMeta;
use crate::core::preferences::{AuthSession, UserPreferences};
use crate::core::record::Record;
use crate::error::{BackendError, ResolveError};
use crate::services::{AppServices, ModulePage};

pub type ResolveFuture = LocalBoxFuture<'static, Result<ResolvedValue, ResolveError>>;

#[derive(Debug, Clone, PartialEq)]
pub struct BaseMetadata {
    pub language: LanguageStrings,
    pub navigation: Option<Vec<NavigationModule>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewContext {
    pub module: String,
    pub action: Option<String>,
    pub record: Option<String>,
    pub meta: ListViewMeta,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    Metadata(BaseMetadata),
    View(ViewContext),
    UserPreference(UserPreferences),
}

pub trait Resolver {
    fn resolve(&self, route: &RouteMatch) -> ResolveFuture;

    /// Publish a value produced by [`resolve`](Self::resolve) to the stores.
    fn commit(&self, _value: &ResolvedValue) {}
}

impl<F> Resolver for F
where
    F: Fn(&RouteMatch) -> ResolveFuture,
{
    fn resolve(&self, route: &RouteMatch) -> ResolveFuture {
        self(route)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Deny,
    /// Deny and send the user to another URL.
    Redirect(String),
}

pub trait Guard {
    fn can_activate(&self, route: &RouteMatch) -> GuardDecision;
}

impl<F> Guard for F
where
    F: Fn(&RouteMatch) -> GuardDecision,
{
    fn can_activate(&self, route: &RouteMatch) -> GuardDecision {
        self(route)
    }
}

fn failed(kind: ResolverKind) -> impl Fn(BackendError) -> ResolveError {
    move |source| ResolveError {
        resolver: kind.name(),
        source,
    }
}

/// Language strings and (unless the route opts out) the module navigation.
pub struct BaseMetadataResolver {
    services: AppServices,
}

impl BaseMetadataResolver {
    pub fn new(services: AppServices) -> Self {
        Self { services }
    }
}

impl Resolver for BaseMetadataResolver {
    fn resolve(&self, route: &RouteMatch) -> ResolveFuture {
        let load = route.entry.data.load.clone().unwrap_or_default();
        let strings = self.services.backend.language_strings();
        let navigation = load.navigation.then(|| self.services.backend.navigation());
        let err = failed(ResolverKind::BaseMetadata);

        async move {
            let mut strings = strings.await.map_err(&err)?;
            if let Some(types) = load.language_strings.as_deref() {
                strings = strings.restricted_to(types);
            }
            let navigation = match navigation {
                Some(fetch) => Some(fetch.await.map_err(&err)?),
                None => None,
            };

            Ok(ResolvedValue::Metadata(BaseMetadata {
                language: strings,
                navigation,
            }))
        }
        .boxed_local()
    }

    fn commit(&self, value: &ResolvedValue) {
        let ResolvedValue::Metadata(meta) = value else {
            return;
        };
        self.services.language.set(meta.language.clone());
        if let Some(modules) = &meta.navigation {
            self.services.navigation.set(modules.clone());
        }
    }
}

/// Loads list metadata and records for the `:module` param.
pub struct ClassicViewResolver {
    services: AppServices,
}

impl ClassicViewResolver {
    pub fn new(services: AppServices) -> Self {
        Self { services }
    }
}

impl Resolver for ClassicViewResolver {
    fn resolve(&self, route: &RouteMatch) -> ResolveFuture {
        let err = failed(ResolverKind::ClassicView);
        let Some(module) = route.param("module").map(str::to_string) else {
            let missing = err(BackendError::UnknownModule(String::new()));
            return futures::future::ready(Err(missing)).boxed_local();
        };
        let action = route.param("action").map(str::to_string);
        let record = route.param("record").map(str::to_string);
        let fetch = self.services.fetch_module(&module);

        async move {
            let page = fetch.await.map_err(&err)?;
            Ok(ResolvedValue::View(ViewContext {
                module,
                action,
                record,
                meta: page.meta,
                records: page.records,
            }))
        }
        .boxed_local()
    }

    fn commit(&self, value: &ResolvedValue) {
        let ResolvedValue::View(view) = value else {
            return;
        };
        self.services.commit_module(&ModulePage {
            module: view.module.clone(),
            meta: view.meta.clone(),
            records: view.records.clone(),
        });
    }
}

pub struct UserPreferenceResolver {
    services: AppServices,
}

impl UserPreferenceResolver {
    pub fn new(services: AppServices) -> Self {
        Self { services }
    }
}

impl Resolver for UserPreferenceResolver {
    fn resolve(&self, _route: &RouteMatch) -> ResolveFuture {
        let fetch = self.services.backend.user_preferences();
        let err = failed(ResolverKind::UserPreference);

        async move {
            let preferences = fetch.await.map_err(&err)?;
            Ok(ResolvedValue::UserPreference(preferences))
        }
        .boxed_local()
    }

    fn commit(&self, value: &ResolvedValue) {
        if let ResolvedValue::UserPreference(preferences) = value {
            self.services.preferences.set(preferences.clone());
        }
    }
}

/// Allows signed-in sessions; everyone else is sent to `Login`.
pub struct AuthGuard {
    session: AuthSession,
}

impl AuthGuard {
    pub fn new(session: AuthSession) -> Self {
        Self { session }
    }
}

impl Guard for AuthGuard {
    fn can_activate(&self, route: &RouteMatch) -> GuardDecision {
        if self.session.is_signed_in() {
            GuardDecision::Allow
        } else {
            debug!(url = %route.url, "no session, redirecting to login");
            GuardDecision::Redirect("/Login".to_string())
        }
    }
}

/// Resolver and guard implementations by kind.
#[derive(Clone, Default)]
pub struct ResolverRegistry {
    resolvers: BTreeMap<ResolverKind, Rc<dyn Resolver>>,
    guards: BTreeMap<GuardKind, Rc<dyn Guard>>,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard resolvers and guards over `services`.
    pub fn for_services(services: &AppServices) -> Self {
        Self::new()
            .with_resolver(
                ResolverKind::BaseMetadata,
                BaseMetadataResolver::new(services.clone()),
            )
            .with_resolver(
                ResolverKind::ClassicView,
                ClassicViewResolver::new(services.clone()),
            )
            .with_resolver(
                ResolverKind::UserPreference,
                UserPreferenceResolver::new(services.clone()),
            )
            .with_guard(GuardKind::Auth, AuthGuard::new(services.session.clone()))
    }

    pub fn with_resolver(mut self, kind: ResolverKind, resolver: impl Resolver + 'static) -> Self {
        self.resolvers.insert(kind, Rc::new(resolver));
        self
    }

    pub fn with_guard(mut self, kind: GuardKind, guard: impl Guard + 'static) -> Self {
        self.guards.insert(kind, Rc::new(guard));
        self
    }

    pub fn resolve(&self, kind: ResolverKind, route: &RouteMatch) -> ResolveFuture {
        match self.resolvers.get(&kind) {
            Some(resolver) => resolver.resolve(route),
            None => {
                let missing = ResolveError {
                    resolver: kind.name(),
                    source: BackendError::Unavailable("no resolver registered".into()),
                };
                futures::future::ready(Err(missing)).boxed_local()
            }
        }
    }

    pub fn commit(&self, kind: ResolverKind, value: &ResolvedValue) {
        if let Some(resolver) = self.resolvers.get(&kind) {
            resolver.commit(value);
        }
    }

    /// Unregistered guards deny.
    pub fn check(&self, kind: GuardKind, route: &RouteMatch) -> GuardDecision {
        self.guards
            .get(&kind)
            .map(|guard| guard.can_activate(route))
            .unwrap_or(GuardDecision::Deny)
    }
}
