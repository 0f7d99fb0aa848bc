//! ---
//! agri_section: "05-networking-external-interfaces"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Typed REST client for the backend API."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ApiClient;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub organization: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordConfirmRequest {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

/// Session payload returned by every successful authentication call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub email: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_password_change: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeResponse {
    pub message: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Whether a social credential is used to sign up or to log in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialMode {
    Signup,
    Login,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleAuthRequest {
    pub credential: String,
    pub mode: SocialMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacebookAuthRequest {
    pub access_token: String,
    pub mode: SocialMode,
}

impl ApiClient {
    pub async fn login(&self, payload: &LoginRequest) -> Result<AuthResponse> {
        self.post_json("auth/login", payload).await
    }

    pub async fn register(&self, payload: &RegisterRequest) -> Result<AuthResponse> {
        self.post_json("auth/register", payload).await
    }

    pub async fn request_signup_code(&self, payload: &RegisterRequest) -> Result<CodeResponse> {
        self.post_json("auth/signup/request-code", payload).await
    }

    pub async fn verify_signup_code(&self, payload: &VerifyCodeRequest) -> Result<AuthResponse> {
        self.post_json("auth/signup/verify-code", payload).await
    }

    pub async fn request_password_reset_code(&self, email: &str) -> Result<CodeResponse> {
        self.post_json(
            "auth/password-reset/request-code",
            &serde_json::json!({ "email": email }),
        )
        .await
    }

    pub async fn confirm_password_reset(
        &self,
        payload: &ResetPasswordConfirmRequest,
    ) -> Result<MessageResponse> {
        self.post_json("auth/password-reset/confirm", payload).await
    }

    /// First-login flow: set the password chosen by the user, clearing the
    /// password-change requirement server-side.
    pub async fn set_first_login_password(&self, new_password: &str) -> Result<MessageResponse> {
        self.post_json(
            "auth/first-login/set-password",
            &serde_json::json!({ "newPassword": new_password }),
        )
        .await
    }

    /// Forward an opaque Google credential to the backend.
    pub async fn google_auth(&self, credential: &str, mode: SocialMode) -> Result<AuthResponse> {
        let body = GoogleAuthRequest {
            credential: credential.to_owned(),
            mode,
        };
        self.post_json("auth/google", &body).await
    }

    /// Forward an opaque Facebook access token to the backend.
    pub async fn facebook_auth(
        &self,
        access_token: &str,
        mode: SocialMode,
    ) -> Result<AuthResponse> {
        let body = FacebookAuthRequest {
            access_token: access_token.to_owned(),
            mode,
        };
        self.post_json("auth/facebook", &body).await
    }
}
