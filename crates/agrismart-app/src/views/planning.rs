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

use agrismart_client::{AgriTask, ApiClient, Campaign, ResourceItem, TaskDraft, TaskStatus};
use agrismart_roles::{permissions, RoleResolver};

use crate::fetch::FetchGate;
use crate::views::GENERIC_ERROR;

#[derive(Debug, Clone, Default)]
pub struct PlanningState {
    pub tasks: Vec<AgriTask>,
    pub campaigns: Vec<Campaign>,
    pub resources: Vec<ResourceItem>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Planning view: tasks, campaigns, and shared resources.
pub struct PlanningView {
    client: Arc<ApiClient>,
    resolver: RoleResolver,
    gate: FetchGate,
    state: RwLock<PlanningState>,
}

impl PlanningView {
    pub fn new(client: Arc<ApiClient>, resolver: RoleResolver) -> Self {
        Self {
            client,
            resolver,
            gate: FetchGate::new(),
            state: RwLock::new(PlanningState::default()),
        }
    }

    pub fn state(&self) -> PlanningState {
        self.state.read().clone()
    }

    pub fn can_manage_tasks(&self) -> bool {
        permissions::can_manage_tasks(self.resolver.current())
    }

    pub fn can_manage_resources(&self) -> bool {
        permissions::can_manage_resources(self.resolver.current())
    }

    pub fn leave(&self) {
        self.gate.invalidate();
    }

    /// Joined fetch of the three planning datasets; all-or-nothing.
    pub async fn load(&self) {
        let generation = self.gate.begin();
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }

        let result = tokio::try_join!(
            self.client.list_tasks(),
            self.client.list_campaigns(),
            self.client.list_resources()
        );

        if !self.gate.is_current(generation) {
            debug!("discarding stale planning load");
            return;
        }
        let mut state = self.state.write();
        state.loading = false;
        match result {
            Ok((tasks, campaigns, resources)) => {
                state.tasks = tasks;
                state.campaigns = campaigns;
                state.resources = resources;
            }
            Err(err) => {
                state.error = Some(err.user_message().to_owned());
            }
        }
    }

    pub async fn create_task(&self, draft: TaskDraft) {
        if !permissions::can_manage_tasks(self.resolver.current()) {
            debug!(role = %self.resolver.current(), "create_task denied");
            return;
        }
        if draft.title.trim().is_empty() {
            self.state.write().error = Some("Le titre est obligatoire.".to_owned());
            return;
        }
        match self.client.create_task(&draft).await {
            Ok(task) => {
                let mut state = self.state.write();
                state.error = None;
                state.tasks.push(task);
            }
            Err(err) => {
                debug!(error = %err, "task creation failed");
                self.state.write().error = Some(GENERIC_ERROR.to_owned());
            }
        }
    }

    pub async fn set_task_status(&self, id: &str, status: TaskStatus) {
        if !permissions::can_manage_tasks(self.resolver.current()) {
            debug!(role = %self.resolver.current(), "set_task_status denied");
            return;
        }
        match self.client.update_task_status(id, status).await {
            Ok(updated) => {
                let mut state = self.state.write();
                if let Some(slot) = state
                    .tasks
                    .iter_mut()
                    .find(|task| task.id.as_deref() == Some(id))
                {
                    *slot = updated;
                }
            }
            Err(err) => {
                debug!(error = %err, "task status update failed");
                self.state.write().error = Some(GENERIC_ERROR.to_owned());
            }
        }
    }

    pub async fn delete_task(&self, id: &str) {
        if !permissions::can_manage_tasks(self.resolver.current()) {
            debug!(role = %self.resolver.current(), "delete_task denied");
            return;
        }
        match self.client.delete_task(id).await {
            Ok(()) => {
                let mut state = self.state.write();
                state.tasks.retain(|task| task.id.as_deref() != Some(id));
            }
            Err(err) => {
                debug!(error = %err, "task deletion failed");
                self.state.write().error = Some(GENERIC_ERROR.to_owned());
            }
        }
    }
}
