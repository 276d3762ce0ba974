//! Which routes each role may visit, and where to send it otherwise.

use uphcs_core::models::user::{Role, User};

pub const LOGIN_ROUTE: &str = "/";

const ADMIN_ROUTES: &[&str] = &["/admin"];
const CONSULTANT_ROUTES: &[&str] = &["/psych-dashboard", "/psych-patients", "/patients"];
const CARE_MANAGER_ROUTES: &[&str] = &["/dashboard", "/active-patients", "/enrolled-patients", "/patients"];

/// Route prefixes permitted for `role`. The first is its home.
pub fn allowed_routes(role: Role) -> &'static [&'static str] {
    match role {
        Role::Admin => ADMIN_ROUTES,
        Role::PsychiatricConsultant => CONSULTANT_ROUTES,
        Role::CareManager => CARE_MANAGER_ROUTES,
    }
}

pub fn home_route(role: Role) -> &'static str {
    allowed_routes(role)[0]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(&'static str),
}

/// Route prefix match: `/patients` admits `/patients/42`, but not
/// `/patientsfoo`.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

pub fn resolve(user: Option<&User>, path: &str) -> RouteDecision {
    let Some(user) = user else {
        return if path == LOGIN_ROUTE {
            RouteDecision::Allow
        } else {
            RouteDecision::Redirect(LOGIN_ROUTE)
        };
    };

    let allowed = allowed_routes(user.role)
        .iter()
        .any(|prefix| matches_prefix(path, prefix));
    if allowed {
        RouteDecision::Allow
    } else {
        tracing::debug!(role = %user.role, path, "redirecting to home route");
        RouteDecision::Redirect(home_route(user.role))
    }
}
