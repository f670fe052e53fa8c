//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An application user able to authenticate by email.
///
/// Accounts are owned by the account management layer; the auth core only
/// reads them and bumps `last_login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Unique account identifier.
    pub id: i32,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last modified.
    pub updated_at: DateTime<Utc>,
    /// Last successful token exchange or refresh.
    pub last_login: DateTime<Utc>,
    /// Lowercase login email address (unique).
    pub email: String,
    /// Display name, used as the `sub` claim.
    pub name: String,
    /// Whether the account may currently authenticate.
    pub active: bool,
    /// Granted roles.
    pub roles: Vec<String>,
}

impl Account {
    /// Returns `true` if the account is allowed to log in.
    pub fn can_login(&self) -> bool {
        self.active
    }

    /// Returns `true` if the account holds the given role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
