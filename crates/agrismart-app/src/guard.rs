//! ---
//! agri_section: "04-navigation-views"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Navigation guards and per-feature view models."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
//! Composable navigation guards.
//!
//! Both gates are pure with respect to their inputs (session state, active
//! role, route metadata) and produce either "allow" or a redirect target,
//! never a partial state.

use agrismart_roles::Role;
use agrismart_session::SessionStore;
use tracing::debug;

use crate::routes::{
    find_route, RouteSpec, ADMIN_HOME, DASHBOARD_HOME, LOGIN_ROUTE, PASSWORD_CHANGE_ROUTE,
};

/// Verdict of a guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect(&'static str),
}

/// Authentication gate.
///
/// Unauthenticated attempts redirect to the login route. An authenticated
/// session that still requires a password change is forced onto the
/// password-change route regardless of the requested target.
pub fn auth_gate(session: &SessionStore, target: &str) -> GuardOutcome {
    if !session.is_authenticated() {
        return GuardOutcome::Redirect(LOGIN_ROUTE);
    }
    let requires_change = session
        .current_user()
        .and_then(|user| user.requires_password_change)
        .unwrap_or(false);
    if requires_change && !target.starts_with(PASSWORD_CHANGE_ROUTE) {
        return GuardOutcome::Redirect(PASSWORD_CHANGE_ROUTE);
    }
    GuardOutcome::Allow
}

/// Role-membership gate.
///
/// Runs after authentication: unauthenticated users go to login before the
/// allow-list is ever consulted. An empty allow-list declares no
/// restriction. Denied users land on a role-appropriate fallback.
pub fn role_gate(session: &SessionStore, role: Role, route: &RouteSpec) -> GuardOutcome {
    if !session.is_authenticated() {
        return GuardOutcome::Redirect(LOGIN_ROUTE);
    }
    if route.allowed_roles.is_empty() || route.allowed_roles.contains(&role) {
        return GuardOutcome::Allow;
    }
    let fallback = if role == Role::Admin {
        ADMIN_HOME
    } else {
        DASHBOARD_HOME
    };
    debug!(path = route.path, %role, fallback, "role gate denied navigation");
    GuardOutcome::Redirect(fallback)
}

/// Evaluate the full guard chain for a navigation to `target`.
///
/// Unknown paths behave like the original client's wildcard route and
/// land on login.
pub fn evaluate(session: &SessionStore, target: &str) -> GuardOutcome {
    let Some(route) = find_route(target) else {
        return GuardOutcome::Redirect(LOGIN_ROUTE);
    };
    if !route.requires_auth {
        return GuardOutcome::Allow;
    }
    match auth_gate(session, target) {
        GuardOutcome::Allow => role_gate(session, session.resolver().current(), route),
        redirect => redirect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use agrismart_roles::RoleResolver;
    use agrismart_session::{ClientStorage, StoredUser};

    fn session(dir: &std::path::Path) -> SessionStore {
        let storage = Arc::new(ClientStorage::open(dir).unwrap());
        let resolver = RoleResolver::new(storage.clone());
        SessionStore::new(storage, resolver)
    }

    fn login_as(session: &SessionStore, backend_role: &str, requires_change: bool) {
        session.store_session(
            "tok-test",
            &StoredUser {
                email: "user@agrismart.example".into(),
                first_name: "U".into(),
                last_name: "Ser".into(),
                role: backend_role.into(),
                profile_picture_url: None,
                requires_password_change: requires_change.then_some(true),
            },
        );
    }

    #[test]
    fn unauthenticated_navigation_redirects_to_login() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(dir.path());
        assert_eq!(
            evaluate(&session, "/app/dashboard"),
            GuardOutcome::Redirect(LOGIN_ROUTE)
        );
        // Public routes stay reachable.
        assert_eq!(evaluate(&session, "/marketplace"), GuardOutcome::Allow);
    }

    #[test]
    fn pending_password_change_forces_redirect_from_any_target() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(dir.path());
        login_as(&session, "TECHNICIEN", true);

        for target in ["/app/dashboard", "/app/support", "/app/agri"] {
            assert_eq!(
                auth_gate(&session, target),
                GuardOutcome::Redirect(PASSWORD_CHANGE_ROUTE),
                "target = {target}"
            );
        }
        assert_eq!(
            auth_gate(&session, PASSWORD_CHANGE_ROUTE),
            GuardOutcome::Allow
        );
    }

    #[test]
    fn denied_non_admin_falls_back_to_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(dir.path());
        login_as(&session, "TECHNICIEN", false);

        let route = RouteSpec {
            path: "/app/planning",
            requires_auth: true,
            allowed_roles: &[Role::Producteur, Role::Admin],
        };
        assert_eq!(
            role_gate(&session, Role::Technicien, &route),
            GuardOutcome::Redirect(DASHBOARD_HOME)
        );
    }

    #[test]
    fn denied_admin_falls_back_to_admin_home() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(dir.path());
        login_as(&session, "ADMIN", false);

        let route = RouteSpec {
            path: "/app/impact",
            requires_auth: true,
            allowed_roles: &[Role::Ong, Role::Etat],
        };
        assert_eq!(
            role_gate(&session, Role::Admin, &route),
            GuardOutcome::Redirect(ADMIN_HOME)
        );
    }

    #[test]
    fn empty_allow_list_admits_any_authenticated_role() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(dir.path());
        login_as(&session, "ONG", false);
        assert_eq!(evaluate(&session, "/app/alerts"), GuardOutcome::Allow);
        assert_eq!(evaluate(&session, "/app/dashboard"), GuardOutcome::Allow);
    }

    #[test]
    fn unknown_target_lands_on_login() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(dir.path());
        login_as(&session, "ADMIN", false);
        assert_eq!(
            evaluate(&session, "/does/not/exist"),
            GuardOutcome::Redirect(LOGIN_ROUTE)
        );
    }

    #[test]
    fn full_chain_respects_role_membership() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(dir.path());
        login_as(&session, "TECHNICIEN", false);
        // Planning allows cooperative/admin only.
        assert_eq!(
            evaluate(&session, "/app/planning"),
            GuardOutcome::Redirect(DASHBOARD_HOME)
        );
        assert_eq!(evaluate(&session, "/app/ai"), GuardOutcome::Allow);
    }
}
