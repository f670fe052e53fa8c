//! Claims carried by access and refresh tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pwdless_entity::account::Account;
use pwdless_entity::token::RefreshToken;

/// Claims embedded in an access token.
///
/// `id`, `sub` and `roles` are required; a token lacking any of them is
/// rejected as an invalid access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Account id.
    pub id: i32,
    /// Account display name.
    pub sub: String,
    /// Granted roles.
    pub roles: Vec<String>,
    /// Issued-at (seconds since epoch).
    #[serde(default)]
    pub iat: i64,
    /// Expiration (seconds since epoch).
    #[serde(default)]
    pub exp: i64,
}

impl AccessClaims {
    /// Projects an account into unstamped claims.
    pub fn for_account(account: &Account) -> Self {
        Self {
            id: account.id,
            sub: account.name.clone(),
            roles: account.roles.clone(),
            iat: 0,
            exp: 0,
        }
    }

    /// Returns `true` if the claims carry the given role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Expiration as a timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Claims embedded in a refresh token.
///
/// The opaque `token` must also match a live refresh record before the
/// claims are honoured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Refresh record id.
    pub id: i32,
    /// Opaque token string of the refresh record.
    pub token: String,
    /// Issued-at (seconds since epoch).
    #[serde(default)]
    pub iat: i64,
    /// Expiration (seconds since epoch).
    #[serde(default)]
    pub exp: i64,
}

impl RefreshClaims {
    /// Projects a refresh record into unstamped claims.
    pub fn for_record(record: &RefreshToken) -> Self {
        Self {
            id: record.id,
            token: record.token.clone(),
            iat: 0,
            exp: 0,
        }
    }
}
