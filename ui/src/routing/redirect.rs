//! Platform navigation hook.
//!
//! The shared crate cannot name a platform's `Route` enum, so platforms
//! register a function that moves their router to a URL. Guards, the wildcard
//! route and in-table links all go through [`redirect`].

use once_cell::sync::OnceCell;
use tracing::{debug, warn};

static REDIRECT: OnceCell<fn(&str)> = OnceCell::new();

pub fn register_redirect(redirect: fn(&str)) {
    if REDIRECT.set(redirect).is_err() {
        debug!("redirect handler already registered");
    }
}

pub fn redirect(url: &str) {
    match REDIRECT.get() {
        Some(handler) => {
            debug!(url, "redirecting");
            handler(url)
        }
        None => warn!(url, "no redirect handler registered, ignoring"),
    }
}
