//! ---
//! agri_section: "04-navigation-views"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Navigation guards and per-feature view models."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use agrismart_client::{ApiClient, UpdatePasswordRequest, UpdateProfileRequest, UserProfile};
use agrismart_session::{SessionStore, UserPatch};

use crate::fetch::FetchGate;
use crate::views::GENERIC_ERROR;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    pub profile: Option<UserProfile>,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Profile view: the signed-in user's own record and password.
pub struct ProfileView {
    client: Arc<ApiClient>,
    session: SessionStore,
    gate: FetchGate,
    state: RwLock<ProfileState>,
}

impl ProfileView {
    pub fn new(client: Arc<ApiClient>, session: SessionStore) -> Self {
        Self {
            client,
            session,
            gate: FetchGate::new(),
            state: RwLock::new(ProfileState::default()),
        }
    }

    pub fn state(&self) -> ProfileState {
        self.state.read().clone()
    }

    pub fn leave(&self) {
        self.gate.invalidate();
    }

    /// Load the profile belonging to the current session's email.
    pub async fn load(&self) {
        let Some(user) = self.session.current_user() else {
            return;
        };
        let generation = self.gate.begin();
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }

        let result = self.client.profile_by_email(&user.email).await;

        if !self.gate.is_current(generation) {
            debug!("discarding stale profile load");
            return;
        }
        let mut state = self.state.write();
        state.loading = false;
        match result {
            Ok(profile) => state.profile = Some(profile),
            Err(err) => state.error = Some(err.user_message().to_owned()),
        }
    }

    /// Save profile edits, then merge them into the persisted session user
    /// so the shell reflects the change without a re-login.
    pub async fn save_profile(&self, user_id: &str, payload: UpdateProfileRequest) {
        {
            let mut state = self.state.write();
            state.error = None;
            state.success = None;
        }
        match self.client.update_user(user_id, &payload).await {
            Ok(profile) => {
                self.session.update_stored_user(UserPatch {
                    first_name: Some(profile.first_name.clone()),
                    last_name: Some(profile.last_name.clone()),
                    profile_picture_url: profile.profile_picture_url.clone(),
                    ..UserPatch::default()
                });
                let mut state = self.state.write();
                state.profile = Some(profile);
                state.success = Some("Profil mis à jour.".to_owned());
            }
            Err(err) => {
                debug!(error = %err, "profile update failed");
                self.state.write().error = Some(GENERIC_ERROR.to_owned());
            }
        }
    }

    /// Change the account password after client-side validation.
    ///
    /// On success the persisted password-change flag is cleared, which also
    /// releases the authentication gate's forced redirect.
    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) {
        {
            let mut state = self.state.write();
            state.error = None;
            state.success = None;
        }
        if current_password.is_empty() || new_password.is_empty() || confirm_password.is_empty() {
            self.state.write().error = Some("Veuillez remplir tous les champs.".to_owned());
            return;
        }
        if new_password != confirm_password {
            self.state.write().error =
                Some("Les mots de passe ne correspondent pas.".to_owned());
            return;
        }
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            self.state.write().error =
                Some("Le mot de passe doit contenir au moins 8 caractères.".to_owned());
            return;
        }

        let payload = UpdatePasswordRequest {
            current_password: current_password.to_owned(),
            new_password: new_password.to_owned(),
        };
        match self.client.update_password(user_id, &payload).await {
            Ok(_) => {
                self.session.update_stored_user(UserPatch {
                    requires_password_change: Some(false),
                    ..UserPatch::default()
                });
                self.state.write().success = Some("Mot de passe mis à jour.".to_owned());
            }
            Err(err) => {
                debug!(error = %err, "password update failed");
                self.state.write().error = Some(GENERIC_ERROR.to_owned());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrismart_roles::RoleResolver;
    use agrismart_session::{ClientStorage, StoredUser};
    use agrismart_common::ApiConfig;

    fn view(dir: &std::path::Path) -> ProfileView {
        let storage = Arc::new(ClientStorage::open(dir).unwrap());
        let resolver = RoleResolver::new(storage.clone());
        let session = SessionStore::new(storage, resolver);
        session.store_session(
            "tok",
            &StoredUser {
                email: "p@agrismart.example".into(),
                first_name: "P".into(),
                last_name: "Q".into(),
                role: "PRODUCTEUR".into(),
                profile_picture_url: None,
                requires_password_change: Some(true),
            },
        );
        let client = Arc::new(ApiClient::new(&ApiConfig {
            // Unreachable on purpose: validation failures must never issue a call.
            base_url: "http://127.0.0.1:9".parse().unwrap(),
        }));
        ProfileView::new(client, session)
    }

    #[tokio::test]
    async fn mismatched_passwords_fail_validation_before_any_call() {
        let dir = tempfile::tempdir().unwrap();
        let view = view(dir.path());
        view.change_password("u1", "old", "newpassword", "different").await;
        assert_eq!(
            view.state().error.as_deref(),
            Some("Les mots de passe ne correspondent pas.")
        );
    }

    #[tokio::test]
    async fn short_password_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let view = view(dir.path());
        view.change_password("u1", "old", "short", "short").await;
        assert_eq!(
            view.state().error.as_deref(),
            Some("Le mot de passe doit contenir au moins 8 caractères.")
        );
    }
}
