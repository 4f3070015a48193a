//! Framework-agnostic state: reactive sources, stores and the data backend.

pub mod backend;
pub mod config;
pub mod format;
pub mod language;
pub mod list_view;
pub mod metadata;
pub mod preferences;
pub mod reactive;
pub mod record;
pub mod screen;
