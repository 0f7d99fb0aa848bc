//! ---
//! agri_section: "02-identity-access"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Role keys, resolution, configuration, and permissions."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
//! Role-scoped view composition primitives for the AgriSmart client.
//!
//! One canonical [`Role`] type is derived from the authenticated session,
//! published through the [`RoleResolver`] as an observable value, and used
//! to select static [`RoleConfig`] bundles and to evaluate the named
//! permission predicates.

pub mod config_table;
pub mod permissions;
pub mod resolver;
pub mod role;

pub use config_table::{lookup, Accent, KpiItem, NavItem, PanelItem, RoleConfig, Tone};
pub use resolver::{MemoryRoleStore, RoleResolver, RoleStore};
pub use role::Role;
