use serde::{Deserialize, Serialize};
use ts_rs::TS;

// --- Identity & Authorization Schemas ---

/// Role
///
/// The closed set of identity classes recognized by the portal. The role is
/// resolved by the external authentication subsystem and is immutable for the
/// lifetime of a session; this crate only ever reads it.
///
/// An unauthenticated caller is represented as `Option<Role>::None` at every
/// API boundary rather than by a sentinel variant, so the type system forces
/// the "absent role" case to be handled explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Role {
    /// Platform administrator: moderation and oversight pages.
    Admin,
    /// Registered teacher: the primary content-producing role.
    Teacher,
    /// Read-only visitor with a session but no publishing rights.
    Guest,
}

/// RouteDescriptor
///
/// Binds one navigable path pattern to its access policy and a page reference.
/// Descriptors are static configuration: defined once at startup, validated by
/// `RouteRegistry::new`, and never mutated afterwards.
///
/// The three policy fields are intentionally overlapping in shape but resolved
/// by a single fixed precedence in `access::evaluate`:
/// public > required_role > allowed_roles > any-authenticated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RouteDescriptor {
    /// Path pattern, unique within the registry. May contain positional
    /// parameters, e.g. `/materials/:id`.
    pub path: String,
    /// Opaque reference to the renderable content for this path. The host UI
    /// maps it to an actual page component; this crate never interprets it.
    pub page: String,
    /// When true, every caller may access this route, authenticated or not.
    /// Takes precedence over both role fields.
    #[serde(default)]
    pub is_public: bool,
    /// When set, only this exact role may access the route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_role: Option<Role>,
    /// When set, any role in the list may access the route. Mutually
    /// exclusive with `required_role`; the combination is rejected at
    /// registry load time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_roles: Option<Vec<Role>>,
}

/// NavigationTab
///
/// One menu affordance. Unlike routes, tabs have no public concept (a tab is
/// only ever shown to a known role) and their paths are matched exactly, with
/// no positional parameters: tabs represent top-level sections, routes
/// represent leaf pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NavigationTab {
    /// Unique stable identifier, e.g. `"recommendations"`.
    pub id: String,
    /// Display text for the menu entry.
    pub label: String,
    /// Target path. Conventionally equals a RouteDescriptor path, but the
    /// registries are independent and this is not enforced.
    pub path: String,
    /// Non-empty set of roles permitted to see this tab.
    pub roles: Vec<Role>,
}

// --- Field-Values Schemas ---

/// AgeRange
///
/// Inclusive numeric bounds for the target-age form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

/// FieldValuesConfig
///
/// The full record of categorical value lists consumed by the material form
/// components, plus the target-age range. A compile-time default instance is
/// always available; at runtime it may be replaced wholesale-per-key by a
/// remote partial record (see `FieldValuesPatch`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldValuesConfig {
    pub format: Vec<String>,
    pub resources_available: Vec<String>,
    pub bloom_level: Vec<String>,
    pub topics: Vec<String>,
    pub mental_load: Vec<String>,
    pub physical_energy: Vec<String>,
    pub priority_categories: Vec<String>,
    pub age_range: AgeRange,
}

impl Default for FieldValuesConfig {
    /// default
    ///
    /// The compiled-in value lists. These are the authoritative fallback: the
    /// form always renders from this instance until (and unless) a remote
    /// fetch succeeds.
    fn default() -> Self {
        let list = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            format: list(&["PDF", "Video", "Audio", "Image", "Interactive"]),
            resources_available: list(&[
                "Printer",
                "Projector",
                "Computers",
                "Tablets",
                "None",
            ]),
            bloom_level: list(&[
                "Remember",
                "Understand",
                "Apply",
                "Analyze",
                "Evaluate",
                "Create",
            ]),
            topics: list(&[
                "Mathematics",
                "Language",
                "Science",
                "Arts",
                "Social Skills",
                "Motor Skills",
            ]),
            mental_load: list(&["Low", "Medium", "High"]),
            physical_energy: list(&["Low", "Medium", "High"]),
            priority_categories: list(&[
                "Attention",
                "Communication",
                "Autonomy",
                "Sensory",
            ]),
            age_range: AgeRange { min: 3, max: 18 },
        }
    }
}

/// FieldValuesPatch
///
/// Partial-update payload shape of the remote field-values endpoint
/// (GET, JSON object). Every key is optional: a present key overwrites the
/// corresponding default key wholesale, an absent key leaves the default
/// untouched. There is no deep merge of list contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldValuesPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources_available: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bloom_level: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mental_load: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_energy: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_categories: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<AgeRange>,
}

impl FieldValuesConfig {
    /// merged
    ///
    /// Shallow per-key merge: returns a new config where every key present in
    /// `patch` replaces the current value wholesale and every absent key is
    /// carried over unchanged. The receiver is never mutated, which is what
    /// lets the provider swap configs atomically under its lock.
    pub fn merged(&self, patch: &FieldValuesPatch) -> FieldValuesConfig {
        FieldValuesConfig {
            format: patch.format.clone().unwrap_or_else(|| self.format.clone()),
            resources_available: patch
                .resources_available
                .clone()
                .unwrap_or_else(|| self.resources_available.clone()),
            bloom_level: patch
                .bloom_level
                .clone()
                .unwrap_or_else(|| self.bloom_level.clone()),
            topics: patch.topics.clone().unwrap_or_else(|| self.topics.clone()),
            mental_load: patch
                .mental_load
                .clone()
                .unwrap_or_else(|| self.mental_load.clone()),
            physical_energy: patch
                .physical_energy
                .clone()
                .unwrap_or_else(|| self.physical_energy.clone()),
            priority_categories: patch
                .priority_categories
                .clone()
                .unwrap_or_else(|| self.priority_categories.clone()),
            age_range: patch.age_range.unwrap_or(self.age_range),
        }
    }
}
