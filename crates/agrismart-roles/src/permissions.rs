//! ---
//! agri_section: "02-identity-access"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Role keys, resolution, configuration, and permissions."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
//! Named permission predicates over the current role.
//!
//! Pure functions, recomputed on every access. Views use them twice: once
//! to decide whether an action control renders, and again inside the action
//! handler before any backend call is issued. The handler check is the
//! actual client-side gate; server-side enforcement remains the backend's
//! responsibility.

use crate::role::Role;

/// Create a marketplace offer.
pub fn can_create_offer(role: Role) -> bool {
    matches!(role, Role::Producteur | Role::Cooperative | Role::Admin)
}

/// Validate a pending marketplace offer.
pub fn can_validate_offer(role: Role) -> bool {
    matches!(role, Role::Cooperative | Role::Admin)
}

/// Delete an arbitrary marketplace offer.
pub fn can_delete_offer(role: Role) -> bool {
    matches!(role, Role::Admin)
}

/// Create, reschedule, or close planning tasks.
pub fn can_manage_tasks(role: Role) -> bool {
    matches!(role, Role::Technicien | Role::Cooperative | Role::Admin)
}

/// Allocate shared resources (equipment, campaigns).
pub fn can_manage_resources(role: Role) -> bool {
    matches!(role, Role::Cooperative | Role::Admin)
}

/// Administer user accounts and role assignments.
pub fn can_manage_users(role: Role) -> bool {
    matches!(role, Role::Admin)
}

/// Open a support ticket.
pub fn can_open_ticket(role: Role) -> bool {
    !matches!(role, Role::Viewer)
}

/// Whether the role is restricted to read-only screens.
pub fn is_read_only(role: Role) -> bool {
    matches!(role, Role::Viewer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offer_lifecycle_permissions() {
        assert!(can_create_offer(Role::Producteur));
        assert!(can_create_offer(Role::Cooperative));
        assert!(!can_create_offer(Role::Viewer));
        assert!(!can_create_offer(Role::Technicien));

        assert!(can_validate_offer(Role::Cooperative));
        assert!(can_validate_offer(Role::Admin));
        assert!(!can_validate_offer(Role::Producteur));

        assert!(can_delete_offer(Role::Admin));
        assert!(!can_delete_offer(Role::Cooperative));
    }

    #[test]
    fn admin_holds_every_capability() {
        for predicate in [
            can_create_offer,
            can_validate_offer,
            can_delete_offer,
            can_manage_tasks,
            can_manage_resources,
            can_manage_users,
            can_open_ticket,
        ] {
            assert!(predicate(Role::Admin));
        }
        assert!(!is_read_only(Role::Admin));
    }

    #[test]
    fn viewer_is_read_only_everywhere() {
        assert!(is_read_only(Role::Viewer));
        for predicate in [
            can_create_offer,
            can_validate_offer,
            can_delete_offer,
            can_manage_tasks,
            can_manage_resources,
            can_manage_users,
            can_open_ticket,
        ] {
            assert!(!predicate(Role::Viewer));
        }
    }
}
