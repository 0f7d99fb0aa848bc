//! ---
//! agri_section: "04-navigation-views"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Navigation guards and per-feature view models."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
use agrismart_roles::Role;

/// Route entered on unauthenticated access.
pub const LOGIN_ROUTE: &str = "/login";
/// Route forced while a password change is pending.
pub const PASSWORD_CHANGE_ROUTE: &str = "/set-new-password";
/// Default landing route inside the application shell.
pub const DASHBOARD_HOME: &str = "/app/dashboard";
/// Landing route for administrators.
pub const ADMIN_HOME: &str = "/app/admin";

/// Static per-route navigation metadata consulted by the guard layer.
///
/// An empty `allowed_roles` list means no role restriction is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSpec {
    pub path: &'static str,
    pub requires_auth: bool,
    pub allowed_roles: &'static [Role],
}

const fn public(path: &'static str) -> RouteSpec {
    RouteSpec {
        path,
        requires_auth: false,
        allowed_roles: &[],
    }
}

const fn app(path: &'static str, allowed_roles: &'static [Role]) -> RouteSpec {
    RouteSpec {
        path,
        requires_auth: true,
        allowed_roles,
    }
}

/// The full route table, mirroring the application's navigation tree.
pub static ROUTES: &[RouteSpec] = &[
    public("/"),
    public("/marketplace"),
    public("/product"),
    public(LOGIN_ROUTE),
    public("/role"),
    app(PASSWORD_CHANGE_ROUTE, &[]),
    app(DASHBOARD_HOME, &[]),
    app("/app/agri", &[Role::Producteur, Role::Technicien, Role::Cooperative, Role::Admin]),
    app("/app/ai", &[Role::Technicien, Role::Admin]),
    app("/app/dashboard-ia", &[Role::Producteur, Role::Technicien, Role::Admin]),
    app("/app/diagnostics", &[Role::Technicien, Role::Admin]),
    app("/app/modeles-ia", &[Role::Admin]),
    app("/app/support", &[]),
    app("/app/planning", &[Role::Cooperative, Role::Admin]),
    app("/app/market", &[Role::Viewer, Role::Producteur, Role::Cooperative, Role::Admin]),
    app("/app/training", &[Role::Cooperative, Role::Ong, Role::Admin]),
    app("/app/impact", &[Role::Ong, Role::Etat, Role::Admin]),
    app(ADMIN_HOME, &[Role::Admin]),
    app("/app/communications", &[Role::Etat, Role::Admin]),
    app("/app/exports-decision", &[Role::Etat, Role::Admin]),
    app("/app/alerts", &[]),
    app("/app/rapports", &[Role::Cooperative, Role::Admin]),
    app("/app/iot", &[Role::Admin]),
    app("/app/logs", &[Role::Admin]),
    app("/app/e-learning", &[]),
    app("/app/course", &[]),
    app("/app/recommendations", &[Role::Cooperative, Role::Admin]),
];

/// Find the route spec whose path prefixes `target` (longest match wins,
/// so `/app/support/ticket/42` resolves to `/app/support`).
pub fn find_route(target: &str) -> Option<&'static RouteSpec> {
    ROUTES
        .iter()
        .filter(|route| {
            target == route.path
                || (target.starts_with(route.path)
                    && target.as_bytes().get(route.path.len()) == Some(&b'/'))
        })
        .max_by_key(|route| route.path.len())
}
