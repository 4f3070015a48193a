//! Shared UI crate for CRM Desk: stores, routing, the list table and views.
//! Platform crates only supply their `Route` enum and launch.

pub mod app;
pub mod core;
pub mod error;
pub mod hooks;
pub mod i18n;
pub mod routing;
pub mod services;
pub mod table;
pub mod views;

pub mod components {
    // Localized application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

pub use app::{AppContext, AppRoot};
pub use routing::redirect::register_redirect;
pub use services::AppServices;

#[cfg(test)]
mod tests {
    mod i18n_completeness;
}
