//! Authentication configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Smallest login token length accepted from configuration.
pub const MIN_LOGIN_TOKEN_LENGTH: usize = 8;

/// Largest token lifetime accepted from configuration (ten years).
pub const MAX_TTL_MINUTES: u64 = 10 * 366 * 24 * 60;

/// Authentication and token lifetime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the client page that consumes login tokens.
    /// The emailed link is `{login_url}/{token}`.
    #[serde(default = "default_login_url")]
    pub login_url: String,
    /// Number of alphanumeric characters in a login token.
    #[serde(default = "default_login_token_length")]
    pub login_token_length: usize,
    /// Login token TTL in minutes.
    #[serde(default = "default_login_token_ttl")]
    pub login_token_ttl_minutes: u64,
    /// Shared secret for JWT signing.
    ///
    /// When unset, empty, or `"random"`, a random 32-byte secret is
    /// generated at startup and tokens do not survive a restart.
    #[serde(default)]
    pub jwt_secret: Option<String>,
    /// HMAC algorithm used to sign and verify tokens.
    #[serde(default)]
    pub jwt_algorithm: SigningAlgorithm,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: u64,
    /// Refresh token TTL in minutes.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_minutes: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_url: default_login_url(),
            login_token_length: default_login_token_length(),
            login_token_ttl_minutes: default_login_token_ttl(),
            jwt_secret: None,
            jwt_algorithm: SigningAlgorithm::default(),
            access_token_ttl_minutes: default_access_ttl(),
            refresh_token_ttl_minutes: default_refresh_ttl(),
        }
    }
}

impl AuthConfig {
    /// Returns the configured secret, or `None` if a random one must be generated.
    pub fn persistent_secret(&self) -> Option<&str> {
        match self.jwt_secret.as_deref().map(str::trim) {
            None | Some("") | Some("random") => None,
            Some(secret) => Some(secret),
        }
    }

    /// Login token length, never shorter than [`MIN_LOGIN_TOKEN_LENGTH`].
    pub fn effective_login_token_length(&self) -> usize {
        self.login_token_length.max(MIN_LOGIN_TOKEN_LENGTH)
    }

    /// Rejects token lifetimes above [`MAX_TTL_MINUTES`].
    pub fn validate(&self) -> Result<(), AppError> {
        let lifetimes = [
            ("auth.login_token_ttl_minutes", self.login_token_ttl_minutes),
            ("auth.access_token_ttl_minutes", self.access_token_ttl_minutes),
            ("auth.refresh_token_ttl_minutes", self.refresh_token_ttl_minutes),
        ];
        for (key, minutes) in lifetimes {
            if minutes > MAX_TTL_MINUTES {
                return Err(AppError::configuration(format!(
                    "{key} = {minutes} exceeds the maximum of {MAX_TTL_MINUTES} minutes"
                )));
            }
        }
        Ok(())
    }

    /// Login token lifetime.
    pub fn login_token_ttl(&self) -> Duration {
        ttl(self.login_token_ttl_minutes)
    }

    /// Access token lifetime.
    pub fn access_token_ttl(&self) -> Duration {
        ttl(self.access_token_ttl_minutes)
    }

    /// Refresh token lifetime.
    pub fn refresh_token_ttl(&self) -> Duration {
        ttl(self.refresh_token_ttl_minutes)
    }
}

/// Minutes to a duration, capped at [`MAX_TTL_MINUTES`] so the conversion
/// never overflows even when [`AuthConfig::validate`] was skipped.
fn ttl(minutes: u64) -> Duration {
    let minutes = i64::try_from(minutes.min(MAX_TTL_MINUTES)).unwrap_or_default();
    Duration::minutes(minutes)
}

/// The symmetric signing algorithms the verifier may be pinned to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SigningAlgorithm {
    /// HMAC using SHA-256.
    #[default]
    HS256,
    /// HMAC using SHA-384.
    HS384,
    /// HMAC using SHA-512.
    HS512,
}

impl std::fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SigningAlgorithm::HS256 => write!(f, "HS256"),
            SigningAlgorithm::HS384 => write!(f, "HS384"),
            SigningAlgorithm::HS512 => write!(f, "HS512"),
        }
    }
}

fn default_login_url() -> String {
    "http://localhost:3000/login".to_string()
}

fn default_login_token_length() -> usize {
    MIN_LOGIN_TOKEN_LENGTH
}

fn default_login_token_ttl() -> u64 {
    11
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    60
}
