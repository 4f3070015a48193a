//! Declarative route table.
//!
//! Entries are matched first to last against the hash path
//! (`#/Accounts/edit/123`). A `:name` segment captures exactly one path
//! segment; `**` matches anything and must be the final entry.

use std::collections::BTreeMap;

use crate::error::RouteError;

pub const WILDCARD: &str = "**";
const MAX_REDIRECTS: usize = 8;

/// View rendered once a route activates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewTarget {
    ListView,
    Login,
    Home,
    ClassicView,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteTarget {
    Component(ViewTarget),
    /// View module loaded on first activation.
    Lazy(ViewTarget),
    Redirect(&'static str),
}

impl RouteTarget {
    pub fn view(&self) -> Option<ViewTarget> {
        match self {
            RouteTarget::Component(view) | RouteTarget::Lazy(view) => Some(*view),
            RouteTarget::Redirect(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResolverKind {
    BaseMetadata,
    ClassicView,
    UserPreference,
}

impl ResolverKind {
    pub fn name(&self) -> &'static str {
        match self {
            ResolverKind::BaseMetadata => "BaseMetadataResolver",
            ResolverKind::ClassicView => "ClassicViewResolver",
            ResolverKind::UserPreference => "UserPreferenceResolver",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GuardKind {
    Auth,
}

/// When an already-active route re-runs its guards and resolvers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunGuardsAndResolvers {
    /// Only when the route params differ from the active ones.
    #[default]
    ParamsChange,
    /// On every navigation, including to the identical URL.
    Always,
}

/// What the base metadata resolver should fetch for a route.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    pub navigation: bool,
    /// `None` loads every string group.
    pub language_strings: Option<Vec<&'static str>>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            navigation: true,
            language_strings: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteData {
    pub reuse_route: Option<bool>,
    pub load: Option<LoadOptions>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub target: RouteTarget,
    /// Ordered `(key, resolver)` pairs; results are exposed under `key`.
    pub resolve: Vec<(&'static str, ResolverKind)>,
    pub can_activate: Vec<GuardKind>,
    pub run_guards_and_resolvers: RunGuardsAndResolvers,
    pub data: RouteData,
}

impl RouteEntry {
    fn with_target(path: &'static str, target: RouteTarget) -> Self {
        Self {
            path,
            target,
            resolve: Vec::new(),
            can_activate: Vec::new(),
            run_guards_and_resolvers: RunGuardsAndResolvers::default(),
            data: RouteData::default(),
        }
    }

    pub fn component(path: &'static str, view: ViewTarget) -> Self {
        Self::with_target(path, RouteTarget::Component(view))
    }

    pub fn lazy(path: &'static str, view: ViewTarget) -> Self {
        Self::with_target(path, RouteTarget::Lazy(view))
    }

    pub fn redirect(path: &'static str, to: &'static str) -> Self {
        Self::with_target(path, RouteTarget::Redirect(to))
    }

    pub fn resolve(mut self, key: &'static str, resolver: ResolverKind) -> Self {
        self.resolve.push((key, resolver));
        self
    }

    pub fn guard(mut self, guard: GuardKind) -> Self {
        self.can_activate.push(guard);
        self
    }

    pub fn always(mut self) -> Self {
        self.run_guards_and_resolvers = RunGuardsAndResolvers::Always;
        self
    }

    pub fn reuse_route(mut self, reuse: bool) -> Self {
        self.data.reuse_route = Some(reuse);
        self
    }

    pub fn load(mut self, load: LoadOptions) -> Self {
        self.data.load = Some(load);
        self
    }

    fn matches(&self, segments: &[String]) -> Option<RouteParams> {
        if self.path == WILDCARD {
            return Some(RouteParams::new());
        }
        let pattern: Vec<&str> = self.path.split('/').filter(|s| !s.is_empty()).collect();
        if pattern.len() != segments.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (expected, actual) in pattern.iter().zip(segments) {
            match expected.strip_prefix(':') {
                Some(name) => {
                    params.insert(name.to_string(), actual.clone());
                }
                None if *expected == actual.as_str() => {}
                None => return None,
            }
        }
        Some(params)
    }
}

pub type RouteParams = BTreeMap<String, String>;

/// A recognized URL: the entry it matched plus captured params.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
    pub index: usize,
    pub entry: RouteEntry,
    pub params: RouteParams,
    /// Normalized path, e.g. `/Accounts/edit/123`.
    pub url: String,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn view(&self) -> Option<ViewTarget> {
        self.entry.target.view()
    }

    /// Same entry with identical params.
    pub fn same_activation(&self, other: &RouteMatch) -> bool {
        self.index == other.index && self.params == other.params
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Rejects tables whose `**` fallback is missing or not last.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, RouteError> {
        match entries.iter().position(|e| e.path == WILDCARD) {
            None => Err(RouteError::MissingWildcard),
            Some(pos) if pos + 1 != entries.len() => Err(RouteError::WildcardNotLast(pos)),
            Some(_) => Ok(Self { entries }),
        }
    }

    /// The client's route table.
    pub fn app() -> Result<Self, RouteError> {
        Self::new(app_route_entries())
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Match `url`, following `redirectTo` entries.
    pub fn recognize(&self, url: &str) -> Result<RouteMatch, RouteError> {
        let mut current = url.to_string();
        for _ in 0..=MAX_REDIRECTS {
            let segments = split_url(&current);
            let (index, entry, params) = self
                .entries
                .iter()
                .enumerate()
                .find_map(|(i, e)| e.matches(&segments).map(|p| (i, e, p)))
                .ok_or_else(|| RouteError::NoMatch(current.clone()))?;

            match entry.target {
                RouteTarget::Redirect(to) => current = to.to_string(),
                _ => {
                    return Ok(RouteMatch {
                        index,
                        entry: entry.clone(),
                        params,
                        url: format!("/{}", segments.join("/")),
                    })
                }
            }
        }
        Err(RouteError::RedirectLoop(url.to_string()))
    }
}

/// Path segments of a hash or plain URL, query string removed, percent-decoded.
pub fn split_url(url: &str) -> Vec<String> {
    let path = url.trim().trim_start_matches('#');
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            urlencoding::decode(segment)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| segment.to_string())
        })
        .collect()
}

fn classic_view(path: &'static str) -> RouteEntry {
    RouteEntry::component(path, ViewTarget::ClassicView)
        .guard(GuardKind::Auth)
        .always()
        .resolve("metadata", ResolverKind::BaseMetadata)
        .resolve("view", ResolverKind::ClassicView)
        .resolve("userPreference", ResolverKind::UserPreference)
        .reuse_route(false)
}

pub fn app_route_entries() -> Vec<RouteEntry> {
    vec![
        RouteEntry::component("Listview", ViewTarget::ListView)
            .resolve("view", ResolverKind::BaseMetadata)
            .resolve("userPreference", ResolverKind::UserPreference),
        RouteEntry::lazy("Login", ViewTarget::Login)
            .resolve("metadata", ResolverKind::BaseMetadata)
            .load(LoadOptions {
                navigation: false,
                language_strings: Some(vec!["appStrings"]),
            }),
        RouteEntry::lazy("Home", ViewTarget::Home)
            .resolve("metadata", ResolverKind::BaseMetadata)
            .resolve("userPreference", ResolverKind::UserPreference),
        classic_view(":module"),
        classic_view(":module/:action"),
        classic_view(":module/:action/:record"),
        RouteEntry::redirect(WILDCARD, "Login"),
    ]
}
