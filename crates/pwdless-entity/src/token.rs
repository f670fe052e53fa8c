//! Refresh token entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A durable refresh token record representing one authenticated client.
///
/// The opaque `token` string is globally unique and replaced on every
/// successful refresh. An `id` of `0` marks a record that has not been
/// inserted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    /// Record identifier (`0` until persisted).
    pub id: i32,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the token was last rotated.
    pub updated_at: DateTime<Utc>,
    /// Owning account.
    #[serde(skip_serializing)]
    pub account_id: i32,
    /// Opaque token string embedded in the signed refresh claims.
    #[serde(skip_serializing)]
    pub token: String,
    /// Absolute expiry of this session.
    #[serde(skip_serializing)]
    pub expiry: DateTime<Utc>,
    /// Whether the client was detected as a mobile device.
    pub mobile: bool,
    /// Free-text device description, e.g. `"Firefox on Linux"`.
    pub identifier: Option<String>,
}

impl RefreshToken {
    /// Builds a not-yet-persisted record.
    pub fn new(
        account_id: i32,
        token: String,
        expiry: DateTime<Utc>,
        mobile: bool,
        identifier: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            created_at: now,
            updated_at: now,
            account_id,
            token,
            expiry,
            mobile,
            identifier,
        }
    }

    /// Returns `true` if the record has no database identity yet.
    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    /// Returns `true` once `now` is strictly past the expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expiry
    }
}
