//! Registry Module Index
//!
//! Owns the two immutable configuration tables the engine is built from and
//! the validation that runs exactly once, when a table is constructed:
//!
//! - `RouteRegistry`: ordered route descriptors with pre-compiled path
//!   patterns (routes support positional parameters).
//! - `NavRegistry`: ordered navigation tabs (exact-path matching only).
//!
//! A table that fails validation never comes into existence; every
//! `ConfigurationError` here indicates a broken authorization policy and
//! must halt startup. After construction the tables are read-only
//! and can be shared freely across threads without locking.

use thiserror::Error;

use crate::models::{NavigationTab, Role, RouteDescriptor};

/// Built-in route table (static configuration).
pub mod routes;

/// Built-in navigation-tab table (static configuration).
pub mod navigation;

pub use navigation::default_tabs;
pub use routes::default_routes;

// --- Errors ---

/// ConfigurationError
///
/// The only error kind in this crate that propagates: it is raised once, at
/// registry load time, and must halt startup. Everything else (denied access,
/// failed fetches, unresolved tab paths) is absorbed into a safe default at
/// the point of occurrence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A descriptor sets both `required_role` and `allowed_roles`. The
    /// evaluator refuses to pick one silently; the policy author must.
    #[error("route '{0}' sets both required_role and allowed_roles")]
    ConflictingRoleFields(String),

    /// Two descriptors share a path pattern.
    #[error("duplicate route path '{0}'")]
    DuplicatePath(String),

    /// `allowed_roles` is present but empty: it would deny every role while
    /// reading like a restriction. Almost certainly an authoring mistake.
    #[error("route '{0}' has an empty allowed_roles list")]
    EmptyAllowedRoles(String),

    /// Two tabs share an id.
    #[error("duplicate navigation tab id '{0}'")]
    DuplicateTabId(String),

    /// A tab with no roles would be visible to nobody.
    #[error("navigation tab '{0}' has an empty roles list")]
    EmptyTabRoles(String),

    /// The tab table must not be empty: the current-tab resolver falls back
    /// to the first tab, which therefore has to exist.
    #[error("navigation registry must contain at least one tab")]
    EmptyNavRegistry,

    /// A registry JSON document failed to deserialize.
    #[error("invalid registry JSON: {0}")]
    InvalidJson(String),
}

// --- Path Patterns ---

/// One compiled segment of a route path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Must match the request segment byte-for-byte.
    Literal(String),
    /// A `:name` placeholder, matches any single non-empty segment. The
    /// placeholder name plays no part in matching.
    Param,
}

/// PathPattern
///
/// A route path compiled into its segment list exactly once, at registry load
/// time, so per-navigation matching never re-parses the pattern string.
/// Matching is segment-wise: literal segments compare exactly, parameter
/// segments accept any single non-empty segment, and the segment counts must
/// agree (so `/materials/:id` matches `/materials/42` but neither
/// `/materials` nor `/materials/42/edit`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// compile
    ///
    /// Splits the pattern on `/`, dropping empty segments so that leading
    /// and trailing slashes are insignificant (`/home` and `/home/` compile
    /// identically; the root pattern `/` compiles to zero segments).
    pub fn compile(pattern: &str) -> Self {
        let segments = split_segments(pattern)
            .map(|seg| {
                if seg.starts_with(':') {
                    Segment::Param
                } else {
                    Segment::Literal(seg.to_string())
                }
            })
            .collect();
        Self { segments }
    }

    /// matches
    ///
    /// True when `path` matches this compiled pattern. Trailing slashes on
    /// the request path are normalized away, mirroring `compile`.
    pub fn matches(&self, path: &str) -> bool {
        let mut actual = split_segments(path);
        for expected in &self.segments {
            let Some(seg) = actual.next() else {
                return false;
            };
            match expected {
                Segment::Literal(lit) => {
                    if seg != lit {
                        return false;
                    }
                }
                // Any non-empty segment satisfies a parameter. Empty
                // segments were already dropped by the split.
                Segment::Param => {}
            }
        }
        actual.next().is_none()
    }
}

/// Splits a path into its non-empty segments. Shared by pattern compilation
/// and request matching so both sides normalize identically.
fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|seg| !seg.is_empty())
}

// --- Route Registry ---

/// A route descriptor paired with its compiled matcher.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub descriptor: RouteDescriptor,
    pattern: PathPattern,
}

/// RouteRegistry
///
/// The ordered, validated route table. Construction performs every policy
/// check this crate knows about, so the evaluator can assume any descriptor
/// it receives from the registry is well-formed and never has to re-validate
/// per request.
#[derive(Debug, Clone)]
pub struct RouteRegistry {
    entries: Vec<RouteEntry>,
}

impl RouteRegistry {
    /// new
    ///
    /// Validates and compiles the given descriptors, preserving declaration
    /// order. Fails fast on the first broken descriptor.
    pub fn new(descriptors: Vec<RouteDescriptor>) -> Result<Self, ConfigurationError> {
        let mut entries: Vec<RouteEntry> = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            if descriptor.required_role.is_some() && descriptor.allowed_roles.is_some() {
                return Err(ConfigurationError::ConflictingRoleFields(descriptor.path));
            }
            if let Some(allowed) = &descriptor.allowed_roles {
                if allowed.is_empty() {
                    return Err(ConfigurationError::EmptyAllowedRoles(descriptor.path));
                }
            }
            if entries.iter().any(|e| e.descriptor.path == descriptor.path) {
                return Err(ConfigurationError::DuplicatePath(descriptor.path));
            }

            let pattern = PathPattern::compile(&descriptor.path);
            entries.push(RouteEntry {
                descriptor,
                pattern,
            });
        }

        Ok(Self { entries })
    }

    /// from_json
    ///
    /// Loads a registry from a JSON array of descriptors (the registry's
    /// shape is the wire contract with whatever renders pages), then runs
    /// the same validation as `new`.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let descriptors: Vec<RouteDescriptor> = serde_json::from_str(json)
            .map_err(|e| ConfigurationError::InvalidJson(e.to_string()))?;
        Self::new(descriptors)
    }

    /// find
    ///
    /// Returns the first entry, in declaration order, whose compiled pattern
    /// matches `path`. `None` means the path is not registered at all.
    pub fn find(&self, path: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.pattern.matches(path))
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }
}

// --- Navigation Registry ---

/// NavRegistry
///
/// The ordered, validated navigation-tab table. Also owns the two pure
/// lookups defined over it: role-based visibility filtering and the
/// current-tab resolver used for menu highlighting. The resolver is purely
/// cosmetic and has no bearing on authorization.
#[derive(Debug, Clone)]
pub struct NavRegistry {
    tabs: Vec<NavigationTab>,
}

impl NavRegistry {
    /// new
    ///
    /// Validates the given tabs, preserving declaration order. The table
    /// must be non-empty and every tab needs a unique id and at least one
    /// role.
    pub fn new(tabs: Vec<NavigationTab>) -> Result<Self, ConfigurationError> {
        if tabs.is_empty() {
            return Err(ConfigurationError::EmptyNavRegistry);
        }
        for (i, tab) in tabs.iter().enumerate() {
            if tab.roles.is_empty() {
                return Err(ConfigurationError::EmptyTabRoles(tab.id.clone()));
            }
            if tabs[..i].iter().any(|earlier| earlier.id == tab.id) {
                return Err(ConfigurationError::DuplicateTabId(tab.id.clone()));
            }
        }
        Ok(Self { tabs })
    }

    /// from_json
    ///
    /// Loads the tab table from a JSON array, then validates as `new` does.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let tabs: Vec<NavigationTab> = serde_json::from_str(json)
            .map_err(|e| ConfigurationError::InvalidJson(e.to_string()))?;
        Self::new(tabs)
    }

    /// visible_tabs
    ///
    /// The declaration-order subsequence of tabs whose `roles` contains the
    /// given role. An absent role sees no tabs: navigation has no public
    /// concept. Cheap enough to call on every render; if a caller memoizes,
    /// the key is `role` alone since the table is immutable.
    pub fn visible_tabs(&self, role: Option<Role>) -> Vec<&NavigationTab> {
        let Some(role) = role else {
            return Vec::new();
        };
        self.tabs
            .iter()
            .filter(|tab| tab.roles.contains(&role))
            .collect()
    }

    /// resolve_tab
    ///
    /// Maps the current path to the tab id to highlight: the first tab whose
    /// path equals `path` exactly, or the first tab's id when nothing
    /// matches. An unmatched path is the defined fallback, not an error, so
    /// this lookup never fails. Deliberately no pattern matching here: tab
    /// paths are top-level sections.
    pub fn resolve_tab(&self, path: &str) -> &str {
        self.tabs
            .iter()
            .find(|tab| tab.path == path)
            .unwrap_or(&self.tabs[0])
            .id
            .as_str()
    }

    /// All tabs in declaration order.
    pub fn tabs(&self) -> &[NavigationTab] {
        &self.tabs
    }
}
