//! ---
//! agri_section: "04-navigation-views"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Navigation guards and per-feature view models."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
use parking_lot::RwLock;
use tracing::debug;

use agrismart_roles::{permissions, RoleResolver};

use crate::views::REQUIRED_FIELDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
}

impl TicketStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Open => "Ouvert",
            TicketStatus::InProgress => "En cours",
            TicketStatus::Resolved => "Résolu",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ticket {
    pub id: u32,
    pub subject: String,
    pub body: String,
    pub status: TicketStatus,
}

#[derive(Debug, Clone, Default)]
pub struct SupportState {
    pub tickets: Vec<Ticket>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Support view. Tickets are kept locally for now; there is no ticket
/// endpoint on the backend yet, so creation appends to the in-memory list.
pub struct SupportView {
    resolver: RoleResolver,
    state: RwLock<SupportState>,
    next_id: RwLock<u32>,
}

impl SupportView {
    pub fn new(resolver: RoleResolver) -> Self {
        let seeded = vec![Ticket {
            id: 1,
            subject: "Bienvenue sur le support AgriSmart".to_owned(),
            body: "Posez vos questions ici, notre équipe vous répondra.".to_owned(),
            status: TicketStatus::Resolved,
        }];
        Self {
            resolver,
            state: RwLock::new(SupportState {
                tickets: seeded,
                ..SupportState::default()
            }),
            next_id: RwLock::new(2),
        }
    }

    pub fn state(&self) -> SupportState {
        self.state.read().clone()
    }

    pub fn can_open_ticket(&self) -> bool {
        permissions::can_open_ticket(self.resolver.current())
    }

    pub fn open_ticket(&self, subject: &str, body: &str) {
        {
            let mut state = self.state.write();
            state.error = None;
            state.success = None;
        }
        if !self.can_open_ticket() {
            debug!(role = %self.resolver.current(), "ticket creation denied");
            return;
        }
        if subject.trim().is_empty() || body.trim().is_empty() {
            self.state.write().error = Some(REQUIRED_FIELDS.to_owned());
            return;
        }
        let id = {
            let mut next = self.next_id.write();
            let id = *next;
            *next += 1;
            id
        };
        let mut state = self.state.write();
        state.tickets.push(Ticket {
            id,
            subject: subject.trim().to_owned(),
            body: body.trim().to_owned(),
            status: TicketStatus::Open,
        });
        state.success = Some("Votre demande a été enregistrée.".to_owned());
    }
}
