use crate::models::{NavigationTab, Role};

/// Built-In Navigation Table
///
/// The portal's static menu configuration, in display order. Order is
/// load-bearing twice over: `visible_tabs` preserves it for rendering, and
/// the first tab is both the current-tab resolver's fallback and (via
/// `access::landing_path`) the redirect target for denied-but-authenticated
/// callers whose first visible tab it is.
///
/// Tabs always require a known role; there is no public tab concept. Tab
/// paths are matched exactly (no positional parameters): tabs name top-level
/// sections, not leaf pages.
pub fn default_tabs() -> Vec<NavigationTab> {
    vec![
        // Recommendations: the default section for every signed-in role,
        // which is why it sits first.
        NavigationTab {
            id: "recommendations".to_string(),
            label: "Recommendations".to_string(),
            path: "/recommendations".to_string(),
            roles: vec![Role::Teacher, Role::Admin, Role::Guest],
        },
        // Favourites: hidden from guests, who cannot save materials.
        NavigationTab {
            id: "favourites".to_string(),
            label: "Favourites".to_string(),
            path: "/favourites".to_string(),
            roles: vec![Role::Teacher, Role::Admin],
        },
        // Upload: content producers only.
        NavigationTab {
            id: "upload".to_string(),
            label: "Upload".to_string(),
            path: "/upload".to_string(),
            roles: vec![Role::Teacher, Role::Admin],
        },
        // Home: the teacher dashboard tab.
        NavigationTab {
            id: "home".to_string(),
            label: "Home".to_string(),
            path: "/home".to_string(),
            roles: vec![Role::Teacher],
        },
        // Administration: moderation tooling.
        NavigationTab {
            id: "admin".to_string(),
            label: "Administration".to_string(),
            path: "/admin".to_string(),
            roles: vec![Role::Admin],
        },
    ]
}
