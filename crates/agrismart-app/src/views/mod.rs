//! ---
//! agri_section: "04-navigation-views"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Navigation guards and per-feature view models."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
//! Per-feature view models.
//!
//! Each view owns transient copies of backend records, a loading flag, and
//! a localized error message. Mutating actions re-check their permission
//! predicate before touching the backend: the render-time flag is
//! advisory, the in-handler check is the client-side gate.

pub mod admin;
pub mod dashboard;
pub mod market;
pub mod planning;
pub mod profile;
pub mod support;

pub use admin::{AdminState, AdminView, NewUserForm};
pub use dashboard::DashboardView;
pub use market::{MarketState, MarketView};
pub use planning::{PlanningState, PlanningView};
pub use profile::{ProfileState, ProfileView};
pub use support::{SupportState, SupportView, Ticket, TicketStatus};

/// Generic localized failure message shared by the views.
pub(crate) const GENERIC_ERROR: &str = "Service indisponible. Veuillez réessayer plus tard.";
/// Localized validation message for incomplete forms.
pub(crate) const REQUIRED_FIELDS: &str = "Veuillez remplir tous les champs obligatoires.";
