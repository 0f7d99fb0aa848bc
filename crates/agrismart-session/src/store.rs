//! ---
//! agri_section: "03-session-persistence"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Durable client storage and session handling."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use agrismart_roles::RoleResolver;

use crate::storage::{ClientStorage, TOKEN_KEY, USER_KEY};

/// Persisted user record attached to the session.
///
/// `role` carries the backend's raw role string; the client-side role key
/// is always derived from it through the resolver, never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_password_change: Option<bool>,
}

/// Shallow patch merged into the stored user record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub requires_password_change: Option<bool>,
}

impl UserPatch {
    fn merge_into(self, user: &mut StoredUser) {
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(url) = self.profile_picture_url {
            user.profile_picture_url = Some(url);
        }
        if let Some(flag) = self.requires_password_change {
            user.requires_password_change = Some(flag);
        }
    }
}

/// Owns the authenticated session: token plus user record, persisted under
/// two fixed storage keys, with the role resolver kept in sync.
///
/// Session operations are infallible from the caller's point of view:
/// malformed persisted state reads as "no session" and persistence
/// failures are logged, never thrown.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<ClientStorage>,
    resolver: RoleResolver,
}

impl SessionStore {
    pub fn new(storage: Arc<ClientStorage>, resolver: RoleResolver) -> Self {
        Self { storage, resolver }
    }

    /// The resolver fed by this session.
    pub fn resolver(&self) -> &RoleResolver {
        &self.resolver
    }

    /// Persist a freshly authenticated session and publish its role.
    pub fn store_session(&self, token: &str, user: &StoredUser) {
        if let Err(err) = self.storage.set(TOKEN_KEY, token) {
            warn!(error = %err, "failed to persist auth token");
        }
        match serde_json::to_string(user) {
            Ok(serialized) => {
                if let Err(err) = self.storage.set(USER_KEY, &serialized) {
                    warn!(error = %err, "failed to persist user record");
                }
            }
            Err(err) => warn!(error = %err, "failed to serialize user record"),
        }
        self.resolver.set_role_from_backend(&user.role);
        info!(email = %user.email, "session stored");
    }

    /// Re-establish a persisted session on cold start.
    ///
    /// A token without a readable user record means the persisted state is
    /// corrupt; it is discarded in full rather than half-trusted.
    pub fn restore_session(&self) {
        let Some(_token) = self.token() else {
            return;
        };
        match self.current_user() {
            Some(user) => {
                self.resolver.set_role_from_backend(&user.role);
                info!(email = %user.email, "session restored");
            }
            None => {
                warn!("persisted session unreadable, logging out");
                self.logout();
            }
        }
    }

    /// Clear all persisted session state and reset the role to viewer.
    pub fn logout(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(err) = self.storage.remove(key) {
                warn!(key, error = %err, "failed to clear persisted key");
            }
        }
        self.resolver.clear_role();
        info!("session cleared");
    }

    /// Token presence is the authentication signal.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY)
    }

    /// The persisted user record, or `None` when absent or malformed.
    pub fn current_user(&self) -> Option<StoredUser> {
        let raw = self.storage.get(USER_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    /// Shallow-merge `patch` into the persisted user record.
    ///
    /// Used by profile edits and for clearing the password-change flag.
    /// A no-op when no user record exists.
    pub fn update_stored_user(&self, patch: UserPatch) {
        let Some(mut user) = self.current_user() else {
            return;
        };
        patch.merge_into(&mut user);
        match serde_json::to_string(&user) {
            Ok(serialized) => {
                if let Err(err) = self.storage.set(USER_KEY, &serialized) {
                    warn!(error = %err, "failed to persist updated user record");
                }
            }
            Err(err) => warn!(error = %err, "failed to serialize updated user record"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ROLE_KEY;
    use agrismart_roles::Role;

    fn session(dir: &std::path::Path) -> (SessionStore, Arc<ClientStorage>) {
        let storage = Arc::new(ClientStorage::open(dir).unwrap());
        let resolver = RoleResolver::new(storage.clone());
        (SessionStore::new(storage.clone(), resolver), storage)
    }

    fn sample_user(role: &str) -> StoredUser {
        StoredUser {
            email: "aicha@agrismart.example".into(),
            first_name: "Aïcha".into(),
            last_name: "Diallo".into(),
            role: role.into(),
            profile_picture_url: None,
            requires_password_change: None,
        }
    }

    #[test]
    fn store_session_persists_and_resolves_role() {
        let dir = tempfile::tempdir().unwrap();
        let (session, storage) = session(dir.path());
        session.store_session("tok-1", &sample_user("COOPERATIVE"));
        assert!(session.is_authenticated());
        assert_eq!(session.resolver().current(), Role::Cooperative);
        assert!(storage.get(USER_KEY).is_some());
    }

    #[test]
    fn update_stored_user_merges_without_dropping_fields() {
        let dir = tempfile::tempdir().unwrap();
        let (session, _storage) = session(dir.path());
        session.store_session("tok-1", &sample_user("PRODUCTEUR"));

        session.update_stored_user(UserPatch {
            first_name: Some("Xavière".into()),
            ..UserPatch::default()
        });

        let user = session.current_user().unwrap();
        assert_eq!(user.first_name, "Xavière");
        assert_eq!(user.last_name, "Diallo");
        assert_eq!(user.email, "aicha@agrismart.example");
        assert_eq!(user.role, "PRODUCTEUR");
    }

    #[test]
    fn logout_clears_all_three_keys_and_resets_role() {
        let dir = tempfile::tempdir().unwrap();
        let (session, storage) = session(dir.path());
        session.store_session("tok-1", &sample_user("ADMIN"));
        assert!(storage.get(ROLE_KEY).is_some());

        session.logout();
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert_eq!(storage.get(USER_KEY), None);
        assert_eq!(storage.get(ROLE_KEY), None);
        assert_eq!(session.resolver().current(), Role::Viewer);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn malformed_user_record_reads_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let (session, storage) = session(dir.path());
        storage.set(TOKEN_KEY, "tok-1").unwrap();
        storage.set(USER_KEY, "{ not a user").unwrap();

        assert_eq!(session.current_user(), None);
        session.restore_session();
        // Restore treats the corrupt record as absence of a session.
        assert!(!session.is_authenticated());
        assert_eq!(session.resolver().current(), Role::Viewer);
    }

    #[test]
    fn update_stored_user_without_session_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let (session, storage) = session(dir.path());
        session.update_stored_user(UserPatch {
            first_name: Some("X".into()),
            ..UserPatch::default()
        });
        assert_eq!(storage.get(USER_KEY), None);
    }
}
