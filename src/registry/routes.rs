use crate::models::{Role, RouteDescriptor};

/// Built-In Route Table
///
/// The portal's static route configuration, in declaration order. Declaration
/// order matters: `RouteRegistry::find` returns the first matching entry.
///
/// Access Control Strategy:
/// Each descriptor carries exactly one restriction shape (public, a single
/// required role, an allowed-role list, or nothing at all), resolved by the
/// fixed precedence in `access::evaluate`. Combining `required_role` with
/// `allowed_roles` is rejected at registry construction.
pub fn default_routes() -> Vec<RouteDescriptor> {
    vec![
        // GET /login
        // Entry point for unauthenticated visitors. Public: reachable by any
        // caller, including one without a session.
        RouteDescriptor {
            path: "/login".to_string(),
            page: "LoginPage".to_string(),
            is_public: true,
            required_role: None,
            allowed_roles: None,
        },
        // GET /register
        // Account creation. Public for the same reason as /login.
        RouteDescriptor {
            path: "/register".to_string(),
            page: "RegisterPage".to_string(),
            is_public: true,
            required_role: None,
            allowed_roles: None,
        },
        // GET /home
        // The teacher landing page (material management dashboard).
        // Restricted to exactly the TEACHER role: admins and guests are
        // redirected to their own landing pages.
        RouteDescriptor {
            path: "/home".to_string(),
            page: "TeacherHomePage".to_string(),
            is_public: false,
            required_role: Some(Role::Teacher),
            allowed_roles: None,
        },
        // GET /admin
        // Moderation and oversight dashboard. ADMIN only.
        RouteDescriptor {
            path: "/admin".to_string(),
            page: "AdminDashboardPage".to_string(),
            is_public: false,
            required_role: Some(Role::Admin),
            allowed_roles: None,
        },
        // GET /recommendations
        // Personalized material recommendations. Every authenticated role
        // may browse, so all three roles are listed.
        RouteDescriptor {
            path: "/recommendations".to_string(),
            page: "RecommendationsPage".to_string(),
            is_public: false,
            required_role: None,
            allowed_roles: Some(vec![Role::Teacher, Role::Admin, Role::Guest]),
        },
        // GET /favourites
        // Saved materials. Guests cannot save, so the list excludes GUEST.
        RouteDescriptor {
            path: "/favourites".to_string(),
            page: "FavouritesPage".to_string(),
            is_public: false,
            required_role: None,
            allowed_roles: Some(vec![Role::Teacher, Role::Admin]),
        },
        // GET /upload
        // Material upload form (the consumer of the field-values config).
        // Content producers only.
        RouteDescriptor {
            path: "/upload".to_string(),
            page: "UploadPage".to_string(),
            is_public: false,
            required_role: None,
            allowed_roles: Some(vec![Role::Teacher, Role::Admin]),
        },
        // GET /materials/:id
        // Detail view for a single material, addressed by a positional
        // parameter. No restriction fields: any authenticated role may view,
        // but an absent session is still redirected to /login.
        RouteDescriptor {
            path: "/materials/:id".to_string(),
            page: "MaterialDetailPage".to_string(),
            is_public: false,
            required_role: None,
            allowed_roles: None,
        },
    ]
}
