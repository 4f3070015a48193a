#![cfg(test)]
/*!
Theme selector lint for the desktop build.

Ensures the selectors the shared components render (list table, list view
sidebar, login form, module view, navbar) stay present in the unified theme
at `ui/assets/theme/main.css`. A substring check is enough as an early warning.

When renaming a class, update the component markup and `REQUIRED_SELECTORS`
together.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const NAVBAR_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/styling/navbar.css"
));

/// Core selectors / tokens that must exist in the shared theme for desktop.
const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".app-shell",
    ".app-main",
    ".page {",
    ".page-error",
    ".route-progress",
    // Buttons
    ".button {",
    ".button--primary",
    ".button--accent",
    ".button--ghost",
    // Login
    ".login-form",
    ".login-form__input",
    ".login-form__error",
    // Home
    ".page-home__modules",
    // List view + widgets sidebar
    ".list-view__header",
    ".list-view__body",
    ".list-view--with-sidebar",
    ".list-view__widgets",
    ".widget__value",
    // List table
    ".list-table {",
    ".list-table--loading",
    ".list-table--empty",
    ".list-table__grid",
    ".list-table__header",
    ".list-table__sort",
    ".list-table__sort-marker",
    ".list-table__checkbox",
    ".list-table__row--selected",
    ".list-table__link",
    ".list-table__actions",
    // Module view
    ".classic-view__header",
    ".classic-view__fields",
    ".classic-view__missing",
    // Responsive blocks track the screen-size breakpoints
    "@media (max-width: 960px)",
    "@media (max-width: 600px)",
];

const NAVBAR_SELECTORS: &[&str] = &[
    ".navbar {",
    ".navbar__links",
    ".navbar__link",
    ".navbar__session",
    ".navbar__locale",
];

fn missing<'a>(css: &str, selectors: &[&'a str]) -> Vec<&'a str> {
    selectors
        .iter()
        .copied()
        .filter(|sel| !css.contains(sel))
        .collect()
}

#[test]
fn unified_theme_contains_required_selectors() {
    let missing = missing(THEME_CSS, REQUIRED_SELECTORS);
    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in unified theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn navbar_stylesheet_contains_required_selectors() {
    let missing = missing(NAVBAR_CSS, NAVBAR_SELECTORS);
    assert!(missing.is_empty(), "navbar.css missing: {missing:?}");
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "Embedded theme appears unexpectedly small ({} non-whitespace chars) – \
         did the file get truncated or path change?",
        non_ws_len
    );
}
