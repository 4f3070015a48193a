//! End-to-end navigation over the application route table and the embedded
//! backend.

use futures::executor::block_on;
use ui::core::list_view::SelectionStatus;
use ui::routing::{
    NavigationOutcome, NavigationPhase, Navigator, ResolvedValue, ResolverRegistry, RouteTable,
    ViewTarget,
};
use ui::services::AppServices;

fn app() -> (Navigator, AppServices) {
    let services = AppServices::embedded().unwrap();
    let navigator = Navigator::new(
        RouteTable::app().unwrap(),
        ResolverRegistry::for_services(&services),
    );
    (navigator, services)
}

#[test]
fn signed_out_edit_is_redirected_before_resolving() {
    let (navigator, services) = app();

    let outcome = block_on(navigator.navigate("#/Accounts/edit/123")).unwrap();
    assert_eq!(
        outcome,
        NavigationOutcome::Redirected {
            to: "/Login".into()
        }
    );
    assert_eq!(navigator.current_phase(), NavigationPhase::Redirected);
    assert!(navigator.active().get().is_none());
    assert!(!services.metadata.list_metadata().has_value());
    assert!(services.list_view.app_state().module.is_empty());

    let outcome = block_on(navigator.navigate("/Login")).unwrap();
    let NavigationOutcome::Activated(active) = outcome else {
        panic!("login should activate");
    };
    assert_eq!(active.view(), Some(ViewTarget::Login));
    assert!(navigator.is_view_loaded(ViewTarget::Login));
}

#[test]
fn signed_in_edit_mounts_module_view() {
    let (navigator, services) = app();
    services.session.sign_in("admin");

    let outcome = block_on(navigator.navigate("#/Accounts/edit/acc-1002")).unwrap();
    let NavigationOutcome::Activated(active) = outcome else {
        panic!("expected activation, got {outcome:?}");
    };
    assert_eq!(active.view(), Some(ViewTarget::ClassicView));
    assert_eq!(
        active.data.keys().collect::<Vec<_>>(),
        ["metadata", "userPreference", "view"]
    );
    let Some(ResolvedValue::View(view)) = active.data.get("view") else {
        panic!("view context missing");
    };
    assert_eq!(view.record.as_deref(), Some("acc-1002"));
    assert_eq!(services.list_view.records().get().unwrap().len(), 3);
}

#[test]
fn unknown_paths_land_on_login() {
    let (navigator, _services) = app();
    let outcome = block_on(navigator.navigate("#/not/a/known/route")).unwrap();
    let NavigationOutcome::Activated(active) = outcome else {
        panic!("expected activation");
    };
    assert_eq!(active.view(), Some(ViewTarget::Login));
    assert_eq!(active.route.url, "/Login");
}

#[test]
fn selection_status_follows_visible_page() {
    let (navigator, services) = app();
    services.session.sign_in("admin");
    block_on(navigator.navigate("/Accounts")).unwrap();

    let store = &services.list_view;
    let status = || store.selection().get().unwrap().status;
    assert_eq!(status(), SelectionStatus::None);

    store.toggle_selection("acc-1001");
    assert_eq!(status(), SelectionStatus::Some);
    store.toggle_selection("acc-1002");
    assert_eq!(status(), SelectionStatus::Some);
    store.toggle_selection("not-on-page");
    assert_eq!(status(), SelectionStatus::Some);
    store.toggle_selection("acc-1003");
    assert_eq!(status(), SelectionStatus::All);
}
