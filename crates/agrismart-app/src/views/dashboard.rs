//! ---
//! agri_section: "04-navigation-views"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Navigation guards and per-feature view models."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
use tokio::sync::watch;

use agrismart_roles::{config_table, Role, RoleConfig, RoleResolver};

/// Dashboard view: pure projection of the active role onto the static
/// role configuration table. No backend calls are involved.
pub struct DashboardView {
    resolver: RoleResolver,
    role_rx: watch::Receiver<Role>,
}

impl DashboardView {
    pub fn new(resolver: RoleResolver) -> Self {
        let role_rx = resolver.subscribe();
        Self { resolver, role_rx }
    }

    /// Configuration bundle for the currently active role.
    pub fn config(&self) -> &'static RoleConfig {
        config_table::lookup(self.resolver.current())
    }

    /// The active role.
    pub fn role(&self) -> Role {
        self.resolver.current()
    }

    /// Await the next role change and return the new configuration.
    ///
    /// Resolves immediately if the role changed since the last call.
    pub async fn config_on_role_change(&mut self) -> &'static RoleConfig {
        // The resolver outlives the channel, so this cannot fail in practice;
        // fall back to the current value if the sender ever went away.
        let _ = self.role_rx.changed().await;
        config_table::lookup(*self.role_rx.borrow_and_update())
    }
}
