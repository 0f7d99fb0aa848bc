//! ---
//! agri_section: "04-navigation-views"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Navigation guards and per-feature view models."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use agrismart_client::{ApiClient, DbRole, DbUser, RegisterRequest, UpdateProfileRequest};
use agrismart_roles::{permissions, RoleResolver};

use crate::fetch::FetchGate;
use crate::views::REQUIRED_FIELDS;

#[derive(Debug, Clone, Default)]
pub struct AdminState {
    pub users: Vec<DbUser>,
    pub roles: Vec<DbRole>,
    /// Role selection pending per user id, seeded from the loaded users.
    pub pending_role_by_user: BTreeMap<String, String>,
    pub loading: bool,
    pub submitting: bool,
    pub error: Option<String>,
    pub submit_error: Option<String>,
    pub submit_success: Option<String>,
}

/// Form fields for the create-user modal.
#[derive(Debug, Clone, Default)]
pub struct NewUserForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub organization: String,
}

/// Administration view: user and role management, admin-only.
pub struct AdminView {
    client: Arc<ApiClient>,
    resolver: RoleResolver,
    gate: FetchGate,
    state: RwLock<AdminState>,
}

impl AdminView {
    pub fn new(client: Arc<ApiClient>, resolver: RoleResolver) -> Self {
        Self {
            client,
            resolver,
            gate: FetchGate::new(),
            state: RwLock::new(AdminState::default()),
        }
    }

    pub fn state(&self) -> AdminState {
        self.state.read().clone()
    }

    pub fn can_manage_users(&self) -> bool {
        permissions::can_manage_users(self.resolver.current())
    }

    pub fn leave(&self) {
        self.gate.invalidate();
    }

    /// Joined fetch of users and roles.
    ///
    /// If either call fails the loading flag clears and neither dataset is
    /// populated from the other call: no partial-success handling.
    pub async fn load(&self) {
        let generation = self.gate.begin();
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }

        let result = tokio::try_join!(self.client.list_users(), self.client.list_roles());

        if !self.gate.is_current(generation) {
            debug!("discarding stale admin load");
            return;
        }
        let mut state = self.state.write();
        state.loading = false;
        match result {
            Ok((users, roles)) => {
                state.pending_role_by_user = users
                    .iter()
                    .filter_map(|user| {
                        Some((user.id.clone()?, user.role_id.clone()?))
                    })
                    .collect();
                state.users = users;
                state.roles = roles;
            }
            Err(err) => {
                state.error = Some(err.user_message().to_owned());
            }
        }
    }

    /// Create a user account through the registration endpoint, then
    /// reload the admin datasets.
    pub async fn create_user(&self, form: NewUserForm) {
        if !permissions::can_manage_users(self.resolver.current()) {
            debug!(role = %self.resolver.current(), "create_user denied");
            return;
        }
        {
            let mut state = self.state.write();
            state.submit_error = None;
            state.submit_success = None;
        }
        if form.first_name.is_empty()
            || form.last_name.is_empty()
            || form.email.is_empty()
            || form.password.is_empty()
            || form.role.is_empty()
        {
            self.state.write().submit_error = Some(REQUIRED_FIELDS.to_owned());
            return;
        }

        self.state.write().submitting = true;
        let payload = RegisterRequest {
            email: form.email,
            password: form.password,
            first_name: form.first_name,
            last_name: form.last_name,
            role: form.role,
            organization: if form.organization.is_empty() {
                "AgriSmart".to_owned()
            } else {
                form.organization
            },
        };

        match self.client.register(&payload).await {
            Ok(_) => {
                {
                    let mut state = self.state.write();
                    state.submitting = false;
                    state.submit_success = Some("Utilisateur créé avec succès.".to_owned());
                }
                self.load().await;
            }
            Err(err) => {
                debug!(error = %err, "user creation failed");
                let mut state = self.state.write();
                state.submitting = false;
                state.submit_error = Some(
                    "Création impossible. Email déjà utilisé ou serveur indisponible.".to_owned(),
                );
            }
        }
    }

    /// Record a role selection for `user_id` without touching the backend.
    pub fn set_pending_role(&self, user_id: &str, role_id: &str) {
        self.state
            .write()
            .pending_role_by_user
            .insert(user_id.to_owned(), role_id.to_owned());
    }

    /// Apply the pending role selection for `user_id` via `PUT users/{id}`.
    ///
    /// A selection equal to the user's current role is a no-op, matching
    /// the pending-selection semantics of the admin screen.
    pub async fn save_user_role(&self, user_id: &str) {
        if !permissions::can_manage_users(self.resolver.current()) {
            debug!(role = %self.resolver.current(), "save_user_role denied");
            return;
        }
        let (user, role_id) = {
            let state = self.state.read();
            let Some(user) = state
                .users
                .iter()
                .find(|user| user.id.as_deref() == Some(user_id))
                .cloned()
            else {
                return;
            };
            let Some(role_id) = state.pending_role_by_user.get(user_id).cloned() else {
                return;
            };
            (user, role_id)
        };
        if user.role_id.as_deref() == Some(role_id.as_str()) {
            return;
        }

        let payload = UpdateProfileRequest {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            organization: user
                .organization
                .clone()
                .unwrap_or_else(|| "AgriSmart".to_owned()),
            account_type: None,
            profile_picture_url: None,
            role_id,
            status: user.status.clone().unwrap_or_else(|| "ACTIVE".to_owned()),
        };
        match self.client.update_user(user_id, &payload).await {
            Ok(_) => {
                {
                    let mut state = self.state.write();
                    state.submit_error = None;
                    state.submit_success = Some(format!(
                        "Rôle de {} {} mis à jour.",
                        user.first_name, user.last_name
                    ));
                }
                self.load().await;
            }
            Err(err) => {
                debug!(error = %err, "user role update failed");
                let mut state = self.state.write();
                state.submit_success = None;
                state.submit_error =
                    Some("Impossible de mettre à jour le rôle utilisateur.".to_owned());
            }
        }
    }

    /// Remove a user account, then reload the admin datasets.
    pub async fn delete_user(&self, user_id: &str) {
        if !permissions::can_manage_users(self.resolver.current()) {
            debug!(role = %self.resolver.current(), "delete_user denied");
            return;
        }
        let Some(user) = self
            .state
            .read()
            .users
            .iter()
            .find(|user| user.id.as_deref() == Some(user_id))
            .cloned()
        else {
            return;
        };
        match self.client.delete_user(user_id).await {
            Ok(()) => {
                {
                    let mut state = self.state.write();
                    state.submit_error = None;
                    state.submit_success = Some(format!(
                        "Utilisateur {} {} supprimé.",
                        user.first_name, user.last_name
                    ));
                }
                self.load().await;
            }
            Err(err) => {
                debug!(error = %err, "user deletion failed");
                let mut state = self.state.write();
                state.submit_success = None;
                state.submit_error = Some("Suppression impossible.".to_owned());
            }
        }
    }

    /// Derived tally used by the header cards.
    pub fn active_users(&self) -> usize {
        self.state
            .read()
            .users
            .iter()
            .filter(|user| {
                user.status
                    .as_deref()
                    .map(|status| status.eq_ignore_ascii_case("active"))
                    .unwrap_or(true)
            })
            .count()
    }
}
