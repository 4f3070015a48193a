//! Navigation state machine.
//!
//! ```text
//! Idle -> Resolving -> Authorized -> Active
//!            |
//!            +-> Denied -> Redirected
//! ```
//!
//! Guards run first, in declaration order. If all allow, every resolver of the
//! target route runs concurrently; the first failure aborts the navigation and
//! the previously active route stays in place. Each call to
//! [`Navigator::navigate`] takes a new generation number, so a navigation that
//! is still resolving when a newer one starts is discarded once it finishes.
//! Resolved values reach the shared stores only after that check passes.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use futures::future::try_join_all;
use tracing::{debug, info, warn};

use super::resolve::{GuardDecision, ResolvedValue, ResolverRegistry};
use super::table::{RouteMatch, RouteTable, RouteTarget, RunGuardsAndResolvers, ViewTarget};
use crate::core::reactive::Source;
use crate::error::NavigationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPhase {
    Idle,
    Resolving,
    Authorized,
    Active,
    Denied,
    Redirected,
}

/// Resolver output keyed by the route's resolve keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedData {
    values: BTreeMap<&'static str, ResolvedValue>,
}

impl ResolvedData {
    pub fn get(&self, key: &str) -> Option<&ResolvedValue> {
        self.values.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveRoute {
    pub route: RouteMatch,
    pub data: ResolvedData,
    pub navigation_id: u64,
}

impl ActiveRoute {
    pub fn view(&self) -> Option<ViewTarget> {
        self.route.view()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavigationOutcome {
    Activated(ActiveRoute),
    /// Same route and params as the active one; nothing re-ran.
    Reused(ActiveRoute),
    Denied { url: String },
    Redirected { to: String },
    /// Superseded by a newer navigation before resolvers finished.
    Cancelled,
}

struct NavigatorInner {
    table: RouteTable,
    registry: ResolverRegistry,
    generation: Cell<u64>,
    phase: Source<NavigationPhase>,
    active: Source<ActiveRoute>,
    loaded_views: RefCell<HashSet<ViewTarget>>,
}

#[derive(Clone)]
pub struct Navigator {
    inner: Rc<NavigatorInner>,
}

impl Navigator {
    pub fn new(table: RouteTable, registry: ResolverRegistry) -> Self {
        Self {
            inner: Rc::new(NavigatorInner {
                table,
                registry,
                generation: Cell::new(0),
                phase: Source::with_value(NavigationPhase::Idle),
                active: Source::new(),
                loaded_views: RefCell::new(HashSet::new()),
            }),
        }
    }

    pub fn phase(&self) -> &Source<NavigationPhase> {
        &self.inner.phase
    }

    pub fn current_phase(&self) -> NavigationPhase {
        self.inner.phase.get().unwrap_or(NavigationPhase::Idle)
    }

    pub fn active(&self) -> &Source<ActiveRoute> {
        &self.inner.active
    }

    pub fn table(&self) -> &RouteTable {
        &self.inner.table
    }

    pub fn is_view_loaded(&self, view: ViewTarget) -> bool {
        self.inner.loaded_views.borrow().contains(&view)
    }

    /// Whether both handles drive the same navigation state.
    pub fn ptr_eq(&self, other: &Navigator) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub async fn navigate(&self, url: &str) -> Result<NavigationOutcome, NavigationError> {
        let inner = &self.inner;
        let id = inner.generation.get() + 1;
        inner.generation.set(id);

        let route = inner.table.recognize(url)?;

        if route.entry.run_guards_and_resolvers == RunGuardsAndResolvers::ParamsChange {
            if let Some(active) = inner.active.get() {
                if active.route.same_activation(&route) {
                    debug!(url = %route.url, "route unchanged, reusing resolved data");
                    self.set_phase(NavigationPhase::Active);
                    return Ok(NavigationOutcome::Reused(active));
                }
            }
        }

        self.set_phase(NavigationPhase::Resolving);

        for guard in &route.entry.can_activate {
            match inner.registry.check(*guard, &route) {
                GuardDecision::Allow => {}
                GuardDecision::Deny => {
                    warn!(url = %route.url, ?guard, "navigation denied");
                    self.set_phase(NavigationPhase::Denied);
                    return Ok(NavigationOutcome::Denied { url: route.url });
                }
                GuardDecision::Redirect(to) => {
                    info!(url = %route.url, to = %to, ?guard, "navigation redirected");
                    self.set_phase(NavigationPhase::Denied);
                    self.set_phase(NavigationPhase::Redirected);
                    return Ok(NavigationOutcome::Redirected { to });
                }
            }
        }

        let pending = route.entry.resolve.iter().map(|&(key, kind)| {
            let fetch = inner.registry.resolve(kind, &route);
            async move { fetch.await.map(|value| (key, kind, value)) }
        });
        let resolved = try_join_all(pending).await;

        if inner.generation.get() != id {
            debug!(url = %route.url, "navigation superseded");
            return Ok(NavigationOutcome::Cancelled);
        }

        let values = match resolved {
            Ok(values) => values,
            Err(err) => {
                warn!(url = %route.url, %err, "resolver failed, navigation aborted");
                let fallback = if inner.active.has_value() {
                    NavigationPhase::Active
                } else {
                    NavigationPhase::Idle
                };
                self.set_phase(fallback);
                return Err(err.into());
            }
        };

        for (_, kind, value) in &values {
            inner.registry.commit(*kind, value);
        }
        self.set_phase(NavigationPhase::Authorized);

        if let RouteTarget::Lazy(view) = route.entry.target {
            if inner.loaded_views.borrow_mut().insert(view) {
                info!(?view, "view module loaded");
            }
        }

        let active = ActiveRoute {
            route,
            data: ResolvedData {
                values: values
                    .into_iter()
                    .map(|(key, _, value)| (key, value))
                    .collect(),
            },
            navigation_id: id,
        };
        inner.active.set(active.clone());
        self.set_phase(NavigationPhase::Active);
        debug!(url = %active.route.url, "route active");
        Ok(NavigationOutcome::Activated(active))
    }

    fn set_phase(&self, phase: NavigationPhase) {
        self.inner.phase.set(phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::{Backend, BackendFuture, EmbeddedBackend, NavigationModule};
    use crate::core::config::SystemConfigStore;
    use crate::core::language::LanguageStrings;
    use crate::core::metadata::ListViewMeta;
    use crate::core::preferences::UserPreferences;
    use crate::core::record::Record;
    use crate::error::{BackendError, ResolveError, RouteError};
    use crate::routing::resolve::{BaseMetadata, ResolveFuture};
    use crate::routing::table::{GuardKind, ResolverKind, RouteEntry, WILDCARD};
    use crate::services::AppServices;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use futures::FutureExt;

    fn recorded_phases(navigator: &Navigator) -> (Rc<RefCell<Vec<NavigationPhase>>>, crate::core::reactive::Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let sub = navigator
            .phase()
            .subscribe(move |phase| sink.borrow_mut().push(*phase));
        seen.borrow_mut().clear();
        (seen, sub)
    }

    fn app_navigator() -> (Navigator, AppServices) {
        let services = AppServices::embedded().unwrap();
        let navigator = Navigator::new(
            RouteTable::app().unwrap(),
            ResolverRegistry::for_services(&services),
        );
        (navigator, services)
    }

    /// Fixture backend whose `list_metadata` for one module waits on a gate.
    struct GatedBackend {
        fixtures: EmbeddedBackend,
        module: &'static str,
        gate: RefCell<Option<oneshot::Receiver<()>>>,
    }

    impl Backend for GatedBackend {
        fn language_strings(&self) -> BackendFuture<LanguageStrings> {
            self.fixtures.language_strings()
        }

        fn navigation(&self) -> BackendFuture<Vec<NavigationModule>> {
            self.fixtures.navigation()
        }

        fn list_metadata(&self, module: &str) -> BackendFuture<ListViewMeta> {
            let fetch = self.fixtures.list_metadata(module);
            let gate = if module == self.module {
                self.gate.borrow_mut().take()
            } else {
                None
            };
            async move {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                fetch.await
            }
            .boxed_local()
        }

        fn list_records(&self, module: &str) -> BackendFuture<Vec<Record>> {
            self.fixtures.list_records(module)
        }

        fn user_preferences(&self) -> BackendFuture<UserPreferences> {
            self.fixtures.user_preferences()
        }
    }

    fn gated_navigator(module: &'static str) -> (Navigator, AppServices, oneshot::Sender<()>) {
        let (release, gate) = oneshot::channel();
        let backend = GatedBackend {
            fixtures: EmbeddedBackend::new(),
            module,
            gate: RefCell::new(Some(gate)),
        };
        let services = AppServices::new(Rc::new(backend), SystemConfigStore::embedded().unwrap());
        services.session.sign_in("admin");
        let navigator = Navigator::new(
            RouteTable::app().unwrap(),
            ResolverRegistry::for_services(&services),
        );
        (navigator, services, release)
    }

    fn empty_metadata() -> ResolvedValue {
        ResolvedValue::Metadata(BaseMetadata {
            language: Default::default(),
            navigation: None,
        })
    }

    #[test]
    fn signed_in_navigation_activates_classic_view() {
        let (navigator, services) = app_navigator();
        services.session.sign_in("admin");
        let (phases, _sub) = recorded_phases(&navigator);

        let outcome = block_on(navigator.navigate("#/Accounts/edit/acc-1001")).unwrap();
        let NavigationOutcome::Activated(active) = outcome else {
            panic!("expected activation, got {outcome:?}");
        };
        assert_eq!(active.view(), Some(ViewTarget::ClassicView));
        assert_eq!(
            active.data.keys().collect::<Vec<_>>(),
            ["metadata", "userPreference", "view"]
        );
        assert_eq!(
            *phases.borrow(),
            [
                NavigationPhase::Resolving,
                NavigationPhase::Authorized,
                NavigationPhase::Active
            ]
        );
    }

    #[test]
    fn guard_denial_never_mounts_or_resolves() {
        let (navigator, services) = app_navigator();
        let (phases, _sub) = recorded_phases(&navigator);

        let outcome = block_on(navigator.navigate("#/Accounts/edit/123")).unwrap();
        assert_eq!(outcome, NavigationOutcome::Redirected { to: "/Login".into() });
        assert_eq!(
            *phases.borrow(),
            [
                NavigationPhase::Resolving,
                NavigationPhase::Denied,
                NavigationPhase::Redirected
            ]
        );
        assert!(!navigator.active().has_value());
        assert!(!services.metadata.list_metadata().has_value());
        assert!(!services.list_view.records().has_value());
    }

    #[test]
    fn wildcard_lands_on_login_and_loads_lazily() {
        let (navigator, _services) = app_navigator();
        assert!(!navigator.is_view_loaded(ViewTarget::Login));

        let outcome = block_on(navigator.navigate("#/no/such/page/here")).unwrap();
        let NavigationOutcome::Activated(active) = outcome else {
            panic!("expected activation");
        };
        assert_eq!(active.view(), Some(ViewTarget::Login));
        assert_eq!(active.route.url, "/Login");
        assert!(navigator.is_view_loaded(ViewTarget::Login));
    }

    #[test]
    fn static_route_reuses_until_params_change() {
        let (navigator, _services) = app_navigator();
        let first = block_on(navigator.navigate("#/Listview")).unwrap();
        assert!(matches!(first, NavigationOutcome::Activated(_)));

        let second = block_on(navigator.navigate("#/Listview")).unwrap();
        assert!(matches!(second, NavigationOutcome::Reused(_)));
    }

    #[test]
    fn always_routes_rerun_on_identical_url() {
        let (navigator, services) = app_navigator();
        services.session.sign_in("admin");

        let first = block_on(navigator.navigate("#/Leads")).unwrap();
        let second = block_on(navigator.navigate("#/Leads")).unwrap();
        let (NavigationOutcome::Activated(a), NavigationOutcome::Activated(b)) = (first, second)
        else {
            panic!("both navigations should activate");
        };
        assert!(b.navigation_id > a.navigation_id);
    }

    #[test]
    fn resolver_failure_keeps_previous_route() {
        let (navigator, services) = app_navigator();
        services.session.sign_in("admin");
        block_on(navigator.navigate("#/Accounts")).unwrap();

        let err = block_on(navigator.navigate("#/Bugs")).unwrap_err();
        assert!(matches!(
            err,
            NavigationError::Resolve(ResolveError {
                source: BackendError::UnknownModule(_),
                ..
            })
        ));
        assert_eq!(navigator.current_phase(), NavigationPhase::Active);
        assert_eq!(navigator.active().get().unwrap().route.url, "/Accounts");
    }

    #[test]
    fn newer_navigation_cancels_in_flight_one() {
        let (release, gate) = oneshot::channel::<()>();
        let gate = RefCell::new(Some(gate));
        let slow = move |_: &RouteMatch| -> ResolveFuture {
            let gate = gate.borrow_mut().take();
            async move {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                Ok(empty_metadata())
            }
            .boxed_local()
        };
        let fast = |_: &RouteMatch| -> ResolveFuture { async { Ok(empty_metadata()) }.boxed_local() };

        let table = RouteTable::new(vec![
            RouteEntry::component("Slow", ViewTarget::ListView).resolve("view", ResolverKind::ClassicView),
            RouteEntry::component("Fast", ViewTarget::Home).resolve("metadata", ResolverKind::BaseMetadata),
            RouteEntry::redirect(WILDCARD, "Fast"),
        ])
        .unwrap();
        let registry = ResolverRegistry::new()
            .with_resolver(ResolverKind::ClassicView, slow)
            .with_resolver(ResolverKind::BaseMetadata, fast);
        let navigator = Navigator::new(table, registry);

        let mut in_flight = Box::pin(navigator.navigate("Slow"));
        assert!(in_flight.as_mut().now_or_never().is_none());

        let fast_outcome = block_on(navigator.navigate("Fast")).unwrap();
        assert!(matches!(fast_outcome, NavigationOutcome::Activated(_)));

        release.send(()).unwrap();
        assert_eq!(block_on(in_flight).unwrap(), NavigationOutcome::Cancelled);
        assert_eq!(navigator.active().get().unwrap().view(), Some(ViewTarget::Home));
    }

    #[test]
    fn superseded_navigation_does_not_write_stores() {
        let (navigator, services, release) = gated_navigator("Contacts");

        let mut slow = Box::pin(navigator.navigate("#/Contacts"));
        assert!(slow.as_mut().now_or_never().is_none());

        let outcome = block_on(navigator.navigate("#/Accounts")).unwrap();
        assert!(matches!(outcome, NavigationOutcome::Activated(_)));
        assert_eq!(services.list_view.app_state().module, "Accounts");

        release.send(()).unwrap();
        assert_eq!(block_on(slow).unwrap(), NavigationOutcome::Cancelled);
        assert_eq!(navigator.active().get().unwrap().route.url, "/Accounts");
        assert_eq!(services.list_view.app_state().module, "Accounts");
        let shown = services.metadata.list_metadata().get().unwrap();
        let accounts = block_on(services.backend.list_metadata("Accounts")).unwrap();
        assert_eq!(shown, accounts);
    }

    #[test]
    fn reuse_during_pending_navigation_settles_active() {
        let (navigator, _services, release) = gated_navigator("Contacts");
        block_on(navigator.navigate("#/Listview")).unwrap();

        let mut pending = Box::pin(navigator.navigate("#/Contacts"));
        assert!(pending.as_mut().now_or_never().is_none());
        assert_eq!(navigator.current_phase(), NavigationPhase::Resolving);

        let back = block_on(navigator.navigate("#/Listview")).unwrap();
        assert!(matches!(back, NavigationOutcome::Reused(_)));
        assert_eq!(navigator.current_phase(), NavigationPhase::Active);

        release.send(()).unwrap();
        assert_eq!(block_on(pending).unwrap(), NavigationOutcome::Cancelled);
        assert_eq!(navigator.current_phase(), NavigationPhase::Active);
        assert_eq!(navigator.active().get().unwrap().route.url, "/Listview");
    }

    #[test]
    fn plain_deny_stays_denied() {
        let table = RouteTable::new(vec![
            RouteEntry::component("Secret", ViewTarget::Home).guard(GuardKind::Auth),
            RouteEntry::redirect(WILDCARD, "Secret"),
        ])
        .unwrap();
        let navigator = Navigator::new(table, ResolverRegistry::new());

        let outcome = block_on(navigator.navigate("Secret")).unwrap();
        assert_eq!(outcome, NavigationOutcome::Denied { url: "/Secret".into() });
        assert_eq!(navigator.current_phase(), NavigationPhase::Denied);
    }

    #[test]
    fn unmatched_url_without_wildcard_is_impossible() {
        assert_eq!(
            RouteTable::new(vec![RouteEntry::component("Home", ViewTarget::Home)]).unwrap_err(),
            RouteError::MissingWildcard
        );
    }
}
