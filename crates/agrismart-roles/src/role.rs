//! ---
//! agri_section: "02-identity-access"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Role keys, resolution, configuration, and permissions."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Closed set of role keys used throughout the client.
///
/// A role is derived exclusively from the authenticated session, never from
/// UI state. The backend's raw role string is mapped through
/// [`Role::from_backend`], which is total: unrecognized values degrade to
/// [`Role::Viewer`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    Viewer,
    Producteur,
    Technicien,
    Cooperative,
    Ong,
    Etat,
    Admin,
}

impl Role {
    /// Complete closed enumeration, in declaration order.
    pub const ALL: [Role; 7] = [
        Role::Viewer,
        Role::Producteur,
        Role::Technicien,
        Role::Cooperative,
        Role::Ong,
        Role::Etat,
        Role::Admin,
    ];

    /// Role assumed when no persisted selection exists on cold start.
    pub const COLD_START_DEFAULT: Role = Role::Technicien;

    /// Map a raw backend role string to a role key.
    ///
    /// Case-insensitive and whitespace-trimmed. `BUYER` is a legacy backend
    /// alias for viewer accounts; `AGRICULTEUR` is the deprecated alias for
    /// producer accounts. Every other unknown value maps to viewer.
    pub fn from_backend(raw: &str) -> Role {
        match raw.trim().to_uppercase().as_str() {
            "VIEWER" | "BUYER" => Role::Viewer,
            "PRODUCTEUR" | "AGRICULTEUR" => Role::Producteur,
            "TECHNICIEN" => Role::Technicien,
            "COOPERATIVE" => Role::Cooperative,
            "ONG" => Role::Ong,
            "ETAT" => Role::Etat,
            "ADMIN" => Role::Admin,
            _ => Role::Viewer,
        }
    }

    /// Storage slug written to the durable role key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Producteur => "producteur",
            Role::Technicien => "technicien",
            Role::Cooperative => "cooperative",
            Role::Ong => "ong",
            Role::Etat => "etat",
            Role::Admin => "admin",
        }
    }

    /// Interpret a persisted storage slug.
    ///
    /// Legacy `buyer` entries read as viewer; anything else that is not a
    /// current slug falls back to the cold-start default rather than
    /// poisoning the session.
    pub fn from_storage(raw: &str) -> Role {
        match raw {
            "viewer" => Role::Viewer,
            "buyer" => Role::Viewer,
            "producteur" => Role::Producteur,
            "agriculteur" => Role::Producteur,
            "technicien" => Role::Technicien,
            "cooperative" => Role::Cooperative,
            "ong" => Role::Ong,
            "etat" => Role::Etat,
            "admin" => Role::Admin,
            _ => Role::COLD_START_DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_mapping_covers_documented_values() {
        assert_eq!(Role::from_backend("VIEWER"), Role::Viewer);
        assert_eq!(Role::from_backend("BUYER"), Role::Viewer);
        assert_eq!(Role::from_backend("PRODUCTEUR"), Role::Producteur);
        assert_eq!(Role::from_backend("AGRICULTEUR"), Role::Producteur);
        assert_eq!(Role::from_backend("TECHNICIEN"), Role::Technicien);
        assert_eq!(Role::from_backend("COOPERATIVE"), Role::Cooperative);
        assert_eq!(Role::from_backend("ONG"), Role::Ong);
        assert_eq!(Role::from_backend("ETAT"), Role::Etat);
        assert_eq!(Role::from_backend("ADMIN"), Role::Admin);
    }

    #[test]
    fn backend_mapping_is_case_insensitive_and_trimmed() {
        assert_eq!(Role::from_backend("  admin "), Role::Admin);
        assert_eq!(Role::from_backend("Cooperative"), Role::Cooperative);
        assert_eq!(Role::from_backend("etat\n"), Role::Etat);
    }

    #[test]
    fn backend_mapping_defaults_unknown_values_to_viewer() {
        for raw in ["", "   ", "superuser", "ADMINISTRATOR", "producteur2"] {
            assert_eq!(Role::from_backend(raw), Role::Viewer, "raw = {raw:?}");
        }
    }

    #[test]
    fn storage_slugs_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_storage(role.as_str()), role);
        }
    }

    #[test]
    fn corrupt_storage_slug_degrades_to_default() {
        assert_eq!(Role::from_storage("buyer"), Role::Viewer);
        assert_eq!(Role::from_storage("garbage"), Role::COLD_START_DEFAULT);
    }

    #[test]
    fn serde_uses_lowercase_keys() {
        assert_eq!(serde_json::to_string(&Role::Ong).unwrap(), "\"ong\"");
        let role: Role = serde_json::from_str("\"cooperative\"").unwrap();
        assert_eq!(role, Role::Cooperative);
    }
}
