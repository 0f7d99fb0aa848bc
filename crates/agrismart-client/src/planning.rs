//! ---
//! agri_section: "05-networking-external-interfaces"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Typed REST client for the backend API."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ApiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    Inprogress,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

/// Planning task as served by `/api/planning/tasks`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgriTask {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub owner_email: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Fields supplied when creating or editing a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

/// Seasonal campaign grouping tasks and resources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Shared equipment or input tracked by the planning module.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceItem {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ApiClient {
    pub async fn list_tasks(&self) -> Result<Vec<AgriTask>> {
        self.get_json("planning/tasks").await
    }

    pub async fn create_task(&self, draft: &TaskDraft) -> Result<AgriTask> {
        self.post_json("planning/tasks", draft).await
    }

    pub async fn update_task(&self, id: &str, draft: &TaskDraft) -> Result<AgriTask> {
        self.put_json(&format!("planning/tasks/{id}"), draft).await
    }

    pub async fn update_task_status(&self, id: &str, status: TaskStatus) -> Result<AgriTask> {
        self.put_json(
            &format!("planning/tasks/{id}/status"),
            &serde_json::json!({ "status": status }),
        )
        .await
    }

    pub async fn delete_task(&self, id: &str) -> Result<()> {
        self.delete(&format!("planning/tasks/{id}")).await
    }

    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        self.get_json("planning/campaigns").await
    }

    pub async fn list_resources(&self) -> Result<Vec<ResourceItem>> {
        self.get_json("planning/resources").await
    }
}
