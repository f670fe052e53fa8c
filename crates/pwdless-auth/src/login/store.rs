//! In-memory login token store guarded by a read/write lock.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use tokio::sync::RwLock;
use tracing::debug;

use pwdless_core::config::AuthConfig;
use pwdless_core::error::AppError;
use pwdless_core::result::AppResult;

/// A short-lived token correlating an emailed string with an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginToken {
    /// The opaque alphanumeric token.
    pub token: String,
    /// Account the token was issued for.
    pub account_id: i32,
    /// Instant after which the token no longer redeems.
    pub expiry: DateTime<Utc>,
}

impl LoginToken {
    /// Returns `true` once `now` is strictly past the expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expiry
    }
}

/// Issues and redeems login tokens without durable storage.
///
/// Tokens are lost on restart. Each token redeems at most once, even under
/// concurrent redemption attempts.
#[derive(Debug)]
pub struct LoginTokenStore {
    tokens: RwLock<HashMap<String, LoginToken>>,
    length: usize,
    ttl: Duration,
}

impl LoginTokenStore {
    /// Creates a store using the configured token length and TTL.
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_ttl(
            config.effective_login_token_length(),
            config.login_token_ttl(),
        )
    }

    /// Creates a store with an explicit token length and TTL.
    pub fn with_ttl(length: usize, ttl: Duration) -> Self {
        Self {
            tokens: RwLock::new(HashMap::new()),
            length,
            ttl,
        }
    }

    /// Issues a new token for the account and purges expired entries.
    pub async fn create_token(&self, account_id: i32) -> AppResult<LoginToken> {
        let expiry = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::internal("login token expiry out of range"))?;

        let token: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect();

        let login_token = LoginToken {
            token: token.clone(),
            account_id,
            expiry,
        };

        {
            let mut tokens = self.tokens.write().await;
            tokens.insert(token, login_token.clone());
        }

        self.purge_expired().await;
        Ok(login_token)
    }

    /// Redeems a token, returning its account id.
    ///
    /// The entry is removed under the write lock before the id is returned.
    /// Unknown and expired tokens yield the same not-found error.
    pub async fn account_id(&self, token: &str) -> AppResult<i32> {
        let removed = self.tokens.write().await.remove(token);
        match removed {
            Some(login_token) if !login_token.is_expired_at(Utc::now()) => {
                Ok(login_token.account_id)
            }
            _ => Err(AppError::not_found("login token not found")),
        }
    }

    /// Deletes every entry whose expiry has passed.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| !t.is_expired_at(now));
        let purged = before - tokens.len();
        if purged > 0 {
            debug!(purged, "Purged expired login tokens");
        }
        purged
    }

    /// Number of tokens currently held.
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Returns `true` if no tokens are held.
    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}
