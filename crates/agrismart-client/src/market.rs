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

/// Lifecycle of a marketplace offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Pending,
    Validated,
    Sold,
}

/// Marketplace offer as served by `/api/market/offers`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(default)]
    pub id: Option<String>,
    pub product: String,
    #[serde(default)]
    pub producer: Option<String>,
    pub quantity: f64,
    pub unit: String,
    pub price: f64,
    pub quality: String,
    pub availability: String,
    pub status: OfferStatus,
    #[serde(default)]
    pub owner_email: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Fields supplied when creating or editing an offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferDraft {
    pub product: String,
    pub quantity: f64,
    pub unit: String,
    pub price: f64,
    pub quality: String,
    pub availability: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_email: Option<String>,
}

/// Reference price entry from the market price board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    pub product: String,
    pub price: f64,
    pub unit: String,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ApiClient {
    pub async fn list_offers(&self) -> Result<Vec<Offer>> {
        self.get_json("market/offers").await
    }

    pub async fn create_offer(&self, draft: &OfferDraft) -> Result<Offer> {
        self.post_json("market/offers", draft).await
    }

    pub async fn update_offer(&self, id: &str, draft: &OfferDraft) -> Result<Offer> {
        self.put_json(&format!("market/offers/{id}"), draft).await
    }

    pub async fn delete_offer(&self, id: &str) -> Result<()> {
        self.delete(&format!("market/offers/{id}")).await
    }

    /// Move a pending offer to the validated state.
    pub async fn validate_offer(&self, id: &str) -> Result<Offer> {
        self.put_json(
            &format!("market/offers/{id}/validate"),
            &serde_json::json!({}),
        )
        .await
    }

    pub async fn list_prices(&self) -> Result<Vec<PriceEntry>> {
        self.get_json("market/prices").await
    }
}
