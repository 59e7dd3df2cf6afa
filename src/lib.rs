//! portal-nav
//!
//! Role-based navigation and route-authorization engine for the materials
//! portal. Given the current session role and a requested path, the engine
//! decides whether access is permitted (redirecting when it is not), which
//! navigation tabs are visible, and which tab should be highlighted. It also
//! supplies the merged field-values configuration consumed by the upload
//! form.
//!
//! The decision surface is deliberately small and pure: registries are
//! immutable after a single validated construction, and every per-navigation
//! function is synchronous and side-effect-free. The one asynchronous piece
//! is the fire-and-forget field-values fetch.

use std::sync::Arc;

// --- Module Structure ---

// Core decision logic and registries.
pub mod access;
pub mod config;
pub mod field_values;
pub mod models;
pub mod registry;

// --- Public Re-exports ---

// Makes the core types easily accessible to the host application shell.
pub use access::{Decision, evaluate, landing_path};
pub use config::{AppConfig, Env};
pub use field_values::{
    FetcherState, FieldValuesFetcher, FieldValuesProvider, HttpFieldValuesClient,
    MockFieldValuesFetcher,
};
pub use models::{
    AgeRange, FieldValuesConfig, FieldValuesPatch, NavigationTab, Role, RouteDescriptor,
};
pub use registry::{ConfigurationError, NavRegistry, PathPattern, RouteEntry, RouteRegistry};

/// NavEngine
///
/// The unified, immutable engine state: both validated registries behind
/// `Arc`s, shared by cheap clone with every part of the host UI that needs a
/// decision. There is no interior mutability anywhere in the engine, so it
/// may be called freely and repeatedly from any thread without coordination.
#[derive(Clone)]
pub struct NavEngine {
    routes: Arc<RouteRegistry>,
    tabs: Arc<NavRegistry>,
}

impl NavEngine {
    /// new
    ///
    /// Assembles the engine from already-validated registries.
    pub fn new(routes: RouteRegistry, tabs: NavRegistry) -> Self {
        Self {
            routes: Arc::new(routes),
            tabs: Arc::new(tabs),
        }
    }

    /// from_descriptors
    ///
    /// Validates raw configuration and assembles the engine in one step.
    /// Any `ConfigurationError` indicates a broken authorization policy and
    /// must halt startup; it is never recoverable at runtime.
    pub fn from_descriptors(
        routes: Vec<RouteDescriptor>,
        tabs: Vec<NavigationTab>,
    ) -> Result<Self, ConfigurationError> {
        let routes = RouteRegistry::new(routes)?;
        let tabs = NavRegistry::new(tabs)?;
        tracing::debug!(
            routes = routes.entries().len(),
            tabs = tabs.tabs().len(),
            "navigation engine constructed"
        );
        Ok(Self::new(routes, tabs))
    }

    /// with_defaults
    ///
    /// The engine over the compiled-in route and tab tables.
    ///
    /// # Panics
    /// Panics if the built-in tables fail validation, which means the crate
    /// itself ships a broken policy. Fail-fast at startup is the only
    /// acceptable behavior for that.
    pub fn with_defaults() -> Self {
        Self::from_descriptors(registry::default_routes(), registry::default_tabs())
            .expect("FATAL: built-in route/navigation tables failed validation")
    }

    /// evaluate_path
    ///
    /// Resolves `path` against the route registry (first declaration-order
    /// pattern match) and evaluates access for `role`. Must be called on
    /// every route transition: the role can change within a session.
    ///
    /// A path that matches no registered route is treated as a denial: an
    /// unregistered path must never be more permissive than a registered
    /// one. Unauthenticated callers go to `/login`, authenticated ones to
    /// their landing page.
    pub fn evaluate_path(&self, role: Option<Role>, path: &str) -> Decision {
        match self.routes.find(path) {
            Some(entry) => access::evaluate(role, &entry.descriptor, &self.tabs),
            None => {
                let target = match role {
                    Some(role) => access::landing_path(role, &self.tabs),
                    None => "/login".to_string(),
                };
                Decision::DenyRedirect { target }
            }
        }
    }

    /// evaluate
    ///
    /// Evaluates access for a specific descriptor (already resolved by the
    /// caller). Pure delegation to `access::evaluate`.
    pub fn evaluate(&self, role: Option<Role>, route: &RouteDescriptor) -> Decision {
        access::evaluate(role, route, &self.tabs)
    }

    /// visible_tabs
    ///
    /// The menu entries visible to `role`, in declaration order. An absent
    /// role sees none.
    pub fn visible_tabs(&self, role: Option<Role>) -> Vec<&NavigationTab> {
        self.tabs.visible_tabs(role)
    }

    /// resolve_tab
    ///
    /// The tab id to highlight for the current path (exact match, first-tab
    /// fallback). Purely cosmetic; never consulted for authorization.
    pub fn resolve_tab(&self, path: &str) -> &str {
        self.tabs.resolve_tab(path)
    }

    /// The validated route table.
    pub fn routes(&self) -> &RouteRegistry {
        &self.routes
    }

    /// The validated navigation table.
    pub fn nav(&self) -> &NavRegistry {
        &self.tabs
    }
}
