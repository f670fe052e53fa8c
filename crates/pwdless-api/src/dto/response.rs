//! Response bodies.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pwdless_auth::TokenPair;
use pwdless_entity::account::Account;

/// Signed token pair returned by `/token` and `/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Access token for protected routes.
    pub access_token: String,
    /// Refresh token for `/refresh` and `/logout`.
    pub refresh_token: String,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

/// Account projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    /// Account identifier.
    pub id: i32,
    /// Normalized login email.
    pub email: String,
    /// Display name, also the access token subject.
    pub name: String,
    /// Granted roles, e.g. `["admin"]`.
    pub roles: Vec<String>,
    /// Whether the account may log in.
    pub active: bool,
    /// Last successful exchange or refresh.
    pub last_login: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            name: account.name,
            roles: account.roles,
            active: account.active,
            last_login: account.last_login,
        }
    }
}

/// Body of `GET /ready`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// HTTP reason phrase of the response.
    pub status: String,
    /// `"ready"`, `"not migrated"` or `"unreachable"`.
    pub database: String,
}

impl ReadinessResponse {
    /// Builds the body for the given response status.
    pub fn new(status: StatusCode, database: &str) -> Self {
        Self {
            status: status.canonical_reason().unwrap_or_default().to_string(),
            database: database.to_string(),
        }
    }
}
