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

use agrismart_client::{ApiClient, Offer, OfferDraft, PriceEntry};
use agrismart_roles::{permissions, RoleResolver};

use crate::fetch::FetchGate;
use crate::views::{GENERIC_ERROR, REQUIRED_FIELDS};

/// Transient display state of the market screen.
#[derive(Debug, Clone, Default)]
pub struct MarketState {
    pub offers: Vec<Offer>,
    pub prices: Vec<PriceEntry>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Marketplace view: offer list, price board, and the gated offer actions.
pub struct MarketView {
    client: Arc<ApiClient>,
    resolver: RoleResolver,
    gate: FetchGate,
    state: RwLock<MarketState>,
}

impl MarketView {
    pub fn new(client: Arc<ApiClient>, resolver: RoleResolver) -> Self {
        Self {
            client,
            resolver,
            gate: FetchGate::new(),
            state: RwLock::new(MarketState::default()),
        }
    }

    /// Snapshot of the current display state.
    pub fn state(&self) -> MarketState {
        self.state.read().clone()
    }

    /// Render-time permission flags.
    pub fn can_create(&self) -> bool {
        permissions::can_create_offer(self.resolver.current())
    }

    pub fn can_validate(&self) -> bool {
        permissions::can_validate_offer(self.resolver.current())
    }

    pub fn can_delete(&self) -> bool {
        permissions::can_delete_offer(self.resolver.current())
    }

    /// Discard any in-flight load (navigation away).
    pub fn leave(&self) {
        self.gate.invalidate();
    }

    /// Joined fetch of offers and prices. Either both datasets are applied
    /// or neither is; a stale completion is discarded entirely.
    pub async fn load(&self) {
        let generation = self.gate.begin();
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }

        let result = tokio::try_join!(self.client.list_offers(), self.client.list_prices());

        if !self.gate.is_current(generation) {
            debug!("discarding stale market load");
            return;
        }
        let mut state = self.state.write();
        state.loading = false;
        match result {
            Ok((offers, prices)) => {
                state.offers = offers;
                state.prices = prices;
            }
            Err(err) => {
                state.error = Some(err.user_message().to_owned());
            }
        }
    }

    /// Create an offer. Returns early without feedback when the role lacks
    /// the capability, even if the control was rendered erroneously.
    pub async fn create_offer(&self, draft: OfferDraft) {
        if !permissions::can_create_offer(self.resolver.current()) {
            debug!(role = %self.resolver.current(), "create_offer denied");
            return;
        }
        if draft.product.trim().is_empty() || draft.quantity <= 0.0 || draft.price <= 0.0 {
            self.state.write().error = Some(REQUIRED_FIELDS.to_owned());
            return;
        }
        match self.client.create_offer(&draft).await {
            Ok(offer) => {
                let mut state = self.state.write();
                state.error = None;
                state.offers.push(offer);
            }
            Err(err) => {
                debug!(error = %err, "offer creation failed");
                self.state.write().error = Some(GENERIC_ERROR.to_owned());
            }
        }
    }

    /// Validate a pending offer (cooperative and admin only).
    pub async fn validate_offer(&self, id: &str) {
        if !permissions::can_validate_offer(self.resolver.current()) {
            debug!(role = %self.resolver.current(), "validate_offer denied");
            return;
        }
        match self.client.validate_offer(id).await {
            Ok(updated) => {
                let mut state = self.state.write();
                if let Some(slot) = state
                    .offers
                    .iter_mut()
                    .find(|offer| offer.id.as_deref() == Some(id))
                {
                    *slot = updated;
                }
            }
            Err(err) => {
                debug!(error = %err, "offer validation failed");
                self.state.write().error = Some(GENERIC_ERROR.to_owned());
            }
        }
    }

    pub async fn delete_offer(&self, id: &str) {
        if !permissions::can_delete_offer(self.resolver.current()) {
            debug!(role = %self.resolver.current(), "delete_offer denied");
            return;
        }
        match self.client.delete_offer(id).await {
            Ok(()) => {
                let mut state = self.state.write();
                state.offers.retain(|offer| offer.id.as_deref() != Some(id));
            }
            Err(err) => {
                debug!(error = %err, "offer deletion failed");
                self.state.write().error = Some(GENERIC_ERROR.to_owned());
            }
        }
    }
}
