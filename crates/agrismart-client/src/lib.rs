//! ---
//! agri_section: "05-networking-external-interfaces"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Typed REST client for the backend API."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
//! Typed client for the AgriSmart backend REST API (`/api`).
//!
//! Payload shapes are parsed at the boundary into explicit records; views
//! never see raw JSON. Calls are single-shot: no retries, no cancellation.
//! Stale completions are the caller's concern (see the view layer's fetch
//! generation counters).

pub mod auth;
pub mod error;
pub mod market;
pub mod planning;
pub mod users;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use agrismart_common::ApiConfig;

pub use auth::{
    AuthResponse, CodeResponse, FacebookAuthRequest, GoogleAuthRequest, LoginRequest,
    MessageResponse, RegisterRequest, ResetPasswordConfirmRequest, SocialMode, VerifyCodeRequest,
};
pub use error::{social_auth_error, ApiError, Result, SocialAuthError};
pub use market::{Offer, OfferDraft, OfferStatus, PriceEntry};
pub use planning::{AgriTask, Campaign, ResourceItem, TaskDraft, TaskPriority, TaskStatus};
pub use users::{DbRole, DbUser, UpdatePasswordRequest, UpdateProfileRequest, UserProfile};

/// HTTP client for the backend, holding the base URL and the session's
/// bearer token when one is present.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Build a client from the API configuration section.
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: config.base_url.clone(),
            token: RwLock::new(None),
        }
    }

    /// Attach (or clear) the bearer token used for authenticated calls.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.read().as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.apply_auth(self.http.get(self.endpoint(path)));
        Self::execute(path, request).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.apply_auth(self.http.post(self.endpoint(path)).json(body));
        Self::execute(path, request).await
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.apply_auth(self.http.put(self.endpoint(path)).json(body));
        Self::execute(path, request).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let request = self.apply_auth(self.http.delete(self.endpoint(path)));
        let response = request.send().await?;
        Self::check_status(path, response).await?;
        Ok(())
    }

    // Transport and decode failures funnel through `From<reqwest::Error>`.
    async fn execute<T: DeserializeOwned>(
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = request.send().await?;
        let response = Self::check_status(path, response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(
        path: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| {
                // Backends answer either `{"message": "..."}` or plain text.
                serde_json::from_str::<serde_json::Value>(&body)
                    .ok()
                    .and_then(|value| {
                        value
                            .get("message")
                            .and_then(|m| m.as_str())
                            .map(str::to_owned)
                    })
                    .or(Some(body))
            })
            .unwrap_or_default();
        debug!(path, status = status.as_u16(), "backend call failed");
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_base(base: &str) -> ApiClient {
        let config = ApiConfig {
            base_url: base.parse().unwrap(),
        };
        ApiClient::new(&config)
    }

    #[test]
    fn endpoint_joins_without_duplicate_slashes() {
        let client = client_with_base("http://localhost:8080/api/");
        assert_eq!(
            client.endpoint("/auth/login"),
            "http://localhost:8080/api/auth/login"
        );
        assert_eq!(
            client.endpoint("market/offers"),
            "http://localhost:8080/api/market/offers"
        );
    }
}
