use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::{Role, RouteDescriptor};
use crate::registry::NavRegistry;

/// Decision
///
/// The outcome of an access evaluation. A denial is a normal value, never an
/// error: the host UI always handles it by performing the redirect, so there
/// is nothing to throw or propagate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "decision", rename_all = "snake_case")]
#[ts(export)]
pub enum Decision {
    /// The caller may load the requested page.
    Allow,
    /// The caller must be sent to `target` instead.
    DenyRedirect { target: String },
}

impl Decision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// landing_path
///
/// The role-appropriate redirect target for a denied-but-authenticated
/// caller: the path of the first navigation tab visible to the role, or
/// `/login` for a role that can see no tabs at all.
pub fn landing_path(role: Role, tabs: &NavRegistry) -> String {
    tabs.visible_tabs(Some(role))
        .first()
        .map(|tab| tab.path.clone())
        .unwrap_or_else(|| "/login".to_string())
}

/// evaluate
///
/// The access decision function. Pure and side-effect-free: it must be
/// invoked on every route transition (a role can change mid-session through
/// re-authentication), and the caller performs the redirect.
///
/// The three overlapping policy fields on a descriptor resolve through one
/// fixed precedence, evaluated top to bottom:
///
/// 1. `is_public`        -> Allow, regardless of role (public always wins).
/// 2. no role            -> DenyRedirect to /login.
/// 3. `required_role`    -> Allow iff the roles are equal.
/// 4. `allowed_roles`    -> Allow iff the role is in the list.
/// 5. no restriction     -> Allow (any authenticated caller).
///
/// A descriptor carrying both `required_role` and `allowed_roles` cannot
/// reach this function: `RouteRegistry::new` rejects it at load time, so the
/// precedence above is total over every descriptor a registry can hand out.
pub fn evaluate(role: Option<Role>, route: &RouteDescriptor, tabs: &NavRegistry) -> Decision {
    // 1. Public routes short-circuit everything, including authentication.
    if route.is_public {
        return Decision::Allow;
    }

    // 2. Everything below requires a session.
    let Some(role) = role else {
        return Decision::DenyRedirect {
            target: "/login".to_string(),
        };
    };

    // 3. Exact-role restriction.
    if let Some(required) = route.required_role {
        return if role == required {
            Decision::Allow
        } else {
            Decision::DenyRedirect {
                target: landing_path(role, tabs),
            }
        };
    }

    // 4. Role-list restriction.
    if let Some(allowed) = &route.allowed_roles {
        return if allowed.contains(&role) {
            Decision::Allow
        } else {
            Decision::DenyRedirect {
                target: landing_path(role, tabs),
            }
        };
    }

    // 5. No restriction fields: open to any authenticated role.
    Decision::Allow
}
