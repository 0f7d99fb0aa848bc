//! ---
//! agri_section: "05-networking-external-interfaces"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Typed REST client for the backend API."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by the backend client.
///
/// Every variant degrades to a localized user-facing message; nothing here
/// is fatal to the process.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (DNS, connect, TLS, timeout).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    /// Non-2xx response from the backend.
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },
    /// Response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// HTTP status code when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Generic localized message shown when a call fails.
    pub fn user_message(&self) -> &'static str {
        "Service indisponible. Veuillez réessayer plus tard."
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err)
        } else {
            ApiError::Network(err)
        }
    }
}

/// Social-auth failure refined by HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialAuthError {
    /// 404: the social identity is not linked to any account.
    NoAccount,
    /// 409: an account with this email already exists.
    AccountExists,
    /// Anything else, including transport failures.
    Generic,
}

impl SocialAuthError {
    pub fn user_message(&self) -> &'static str {
        match self {
            SocialAuthError::NoAccount => "Aucun compte associé à ce profil social.",
            SocialAuthError::AccountExists => "Un compte existe déjà avec cet email.",
            SocialAuthError::Generic => "Connexion sociale impossible. Veuillez réessayer.",
        }
    }
}

/// Classify a failed social-auth call.
pub fn social_auth_error(err: &ApiError) -> SocialAuthError {
    match err.status() {
        Some(404) => SocialAuthError::NoAccount,
        Some(409) => SocialAuthError::AccountExists,
        _ => SocialAuthError::Generic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn social_auth_statuses_are_distinguished() {
        let not_found = ApiError::Status {
            status: 404,
            message: "not found".into(),
        };
        let conflict = ApiError::Status {
            status: 409,
            message: "conflict".into(),
        };
        let server = ApiError::Status {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(social_auth_error(&not_found), SocialAuthError::NoAccount);
        assert_eq!(social_auth_error(&conflict), SocialAuthError::AccountExists);
        assert_eq!(social_auth_error(&server), SocialAuthError::Generic);
    }
}
