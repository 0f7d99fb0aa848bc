//! ---
//! agri_section: "02-identity-access"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Role keys, resolution, configuration, and permissions."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::debug;

use crate::role::Role;

/// Durable persistence seam for the selected role.
///
/// Implementations must be infallible from the resolver's point of view:
/// a failed write is logged by the implementation, never surfaced upward.
pub trait RoleStore: Send + Sync + 'static {
    /// Read the persisted role slug, if any.
    fn load_role(&self) -> Option<String>;
    /// Persist the role slug.
    fn store_role(&self, slug: &str);
    /// Remove the persisted role slug.
    fn clear_role(&self);
}

/// In-memory [`RoleStore`] suitable for development and testing.
#[derive(Debug, Default)]
pub struct MemoryRoleStore {
    slug: RwLock<Option<String>>,
}

impl MemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoleStore for MemoryRoleStore {
    fn load_role(&self) -> Option<String> {
        self.slug.read().clone()
    }

    fn store_role(&self, slug: &str) {
        *self.slug.write() = Some(slug.to_owned());
    }

    fn clear_role(&self) {
        *self.slug.write() = None;
    }
}

/// Holds the active role as a single observable value.
///
/// Exactly one role is active per session. The value is updated in place
/// (not queued) and fanned out to subscribers through a watch channel.
/// Resolution is total by construction, so no operation here can fail.
#[derive(Clone)]
pub struct RoleResolver {
    tx: Arc<watch::Sender<Role>>,
    store: Arc<dyn RoleStore>,
}

impl RoleResolver {
    /// Build a resolver, seeding the active role from persisted state when
    /// present and valid, else the cold-start default.
    pub fn new(store: Arc<dyn RoleStore>) -> Self {
        let initial = store
            .load_role()
            .map(|slug| Role::from_storage(&slug))
            .unwrap_or(Role::COLD_START_DEFAULT);
        let (tx, _rx) = watch::channel(initial);
        Self {
            tx: Arc::new(tx),
            store,
        }
    }

    /// The currently active role.
    pub fn current(&self) -> Role {
        *self.tx.borrow()
    }

    /// Subscribe to role changes. The receiver immediately observes the
    /// current value.
    pub fn subscribe(&self) -> watch::Receiver<Role> {
        self.tx.subscribe()
    }

    /// Set the active role directly (manual role-switch / demo flows).
    pub fn set_role(&self, role: Role) {
        debug!(role = %role, "active role set");
        self.tx.send_replace(role);
        self.store.store_role(role.as_str());
    }

    /// Apply the fixed backend mapping, then set the resulting role.
    pub fn set_role_from_backend(&self, raw: &str) {
        self.set_role(Role::from_backend(raw));
    }

    /// Reset the active role to viewer and drop the persisted selection.
    pub fn clear_role(&self) {
        debug!("active role cleared");
        self.tx.send_replace(Role::Viewer);
        self.store.clear_role();
    }
}
