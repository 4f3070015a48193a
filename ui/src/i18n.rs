//! Fluent catalogs for the CRM Desk chrome (navbar, login form, list view
//! labels). CRM field labels and module names come from the backend through
//! `LanguageStore`; this module only covers strings the client owns.
//!
//! Catalogs live in `i18n/<locale>/crmdesk-ui.ftl` and are embedded at compile
//! time. `en-US` is the fallback and the reference for the completeness tests.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use tracing::{debug, warn};
use unic_langid::{langid, LanguageIdentifier};

pub use i18n_embed_fl::fl;

/// `t!("key")` / `t!("key", arg = value)` against the shared [`LOADER`].
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

const DOMAIN: &str = "crmdesk-ui";
const FALLBACK: LanguageIdentifier = langid!("en-US");

#[derive(Embed)]
#[folder = "i18n"]
struct Catalogs;

pub static LOADER: Lazy<FluentLanguageLoader> =
    Lazy::new(|| FluentLanguageLoader::new(DOMAIN, FALLBACK));

static INIT: Once = Once::new();

/// An embedded catalog, labelled in its own language for the picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locale {
    pub tag: String,
    pub name: &'static str,
}

fn native_name(tag: &str) -> &'static str {
    match tag {
        "en-US" => "English",
        "es-ES" => "Español",
        "fr-FR" => "Français",
        _ => "",
    }
}

/// Selects catalogs from the OS / browser language list. Safe to call on
/// every render.
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        match i18n_embed::select(&*LOADER, &Catalogs, &requested) {
            Ok(selected) => debug!(?selected, "ui catalogs selected"),
            Err(err) => warn!(%err, "catalog selection failed, using en-US"),
        }
    });
}

/// Switches the active catalog. Unparseable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        debug!(tag, "ignoring unparseable language tag");
        return Ok(());
    };
    i18n_embed::select(&*LOADER, &Catalogs, &[lang]).map(|_| ())
}

/// Tag of the catalog currently used for lookups.
pub fn current_language() -> String {
    LOADER.current_language().to_string()
}

/// Embedded catalogs sorted by tag.
pub fn locales() -> Vec<Locale> {
    let mut tags: Vec<String> = Catalogs::iter()
        .filter_map(|path| path.split('/').next().map(str::to_string))
        .collect();
    tags.sort();
    tags.dedup();
    tags.into_iter()
        .map(|tag| {
            let name = native_name(&tag);
            Locale { tag, name }
        })
        .collect()
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}
