//! Error types shared across the routing, configuration and data layers.

use thiserror::Error;

/// The system configuration document could not be read.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("system config is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("config value `{key}` has an unexpected shape: {source}")]
    InvalidValue {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// A fetch against the data backend failed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BackendError {
    #[error("unknown module `{0}`")]
    UnknownModule(String),
    #[error("failed to decode {what}: {message}")]
    Decode { what: String, message: String },
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// A named resolver failed; navigation is aborted.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("resolver `{resolver}` failed: {source}")]
pub struct ResolveError {
    pub resolver: &'static str,
    #[source]
    pub source: BackendError,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RouteError {
    #[error("route table has no `**` fallback entry")]
    MissingWildcard,
    #[error("`**` fallback must be the last route (found at position {0})")]
    WildcardNotLast(usize),
    #[error("no route matches `{0}`")]
    NoMatch(String),
    #[error("redirect loop while resolving `{0}`")]
    RedirectLoop(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum NavigationError {
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// The shared services or the route table could not be built at startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Route(#[from] RouteError),
}
