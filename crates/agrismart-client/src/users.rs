//! ---
//! agri_section: "05-networking-external-interfaces"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Typed REST client for the backend API."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::{ApiClient, MessageResponse};

/// User record as stored by the backend's document database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DbUser {
    #[serde(default)]
    pub id: Option<String>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub role_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Backend role document (distinct from the client-side role key).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DbRole {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role_id: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_client_approved: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Payload for `PUT users/{id}`. Role reassignment sends only the
/// identity fields plus the new `roleId`, so the optional fields are
/// omitted from the body when unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub organization: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    pub role_id: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl ApiClient {
    pub async fn list_users(&self) -> Result<Vec<DbUser>> {
        self.get_json("users").await
    }

    pub async fn get_user(&self, id: &str) -> Result<DbUser> {
        self.get_json(&format!("users/{id}")).await
    }

    pub async fn update_user(
        &self,
        id: &str,
        payload: &UpdateProfileRequest,
    ) -> Result<UserProfile> {
        self.put_json(&format!("users/{id}"), payload).await
    }

    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.delete(&format!("users/{id}")).await
    }

    pub async fn update_password(
        &self,
        id: &str,
        payload: &UpdatePasswordRequest,
    ) -> Result<MessageResponse> {
        self.put_json(&format!("users/{id}/password"), payload).await
    }

    /// Fetch a profile by email address (percent-encoded path segment).
    pub async fn profile_by_email(&self, email: &str) -> Result<UserProfile> {
        let encoded = utf8_percent_encode(email, NON_ALPHANUMERIC).to_string();
        self.get_json(&format!("users/email/{encoded}")).await
    }

    pub async fn list_roles(&self) -> Result<Vec<DbRole>> {
        self.get_json("roles").await
    }
}
