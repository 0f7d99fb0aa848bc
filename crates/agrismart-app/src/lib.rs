//! ---
//! agri_section: "04-navigation-views"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Navigation guards and per-feature view models."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
//! Navigation and view layer of the AgriSmart client.
//!
//! The guard layer decides whether a navigation completes; view models own
//! the transient client-side copies of backend records, apply the
//! permission predicates, and absorb every backend failure into a local
//! error message.

pub mod fetch;
pub mod guard;
pub mod routes;
pub mod views;

pub use fetch::FetchGate;
pub use guard::{auth_gate, evaluate, role_gate, GuardOutcome};
pub use routes::{find_route, RouteSpec, ADMIN_HOME, DASHBOARD_HOME, LOGIN_ROUTE, PASSWORD_CHANGE_ROUTE};
