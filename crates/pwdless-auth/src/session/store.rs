//! Store capabilities consumed by the session orchestrator, implemented
//! over the Postgres repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use pwdless_core::error::AppError;
use pwdless_core::result::AppResult;
use pwdless_database::repositories::{AccountRepository, RefreshTokenRepository};
use pwdless_entity::account::Account;
use pwdless_entity::token::RefreshToken;

/// Read access to accounts plus the last-login bump.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Finds an account by id.
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Account>>;

    /// Finds an account by normalized email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Records a successful authentication.
    async fn update_last_login(&self, id: i32, at: DateTime<Utc>) -> AppResult<()>;
}

/// Durable refresh token records.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync + 'static {
    /// Finds a record by its opaque token string.
    async fn lookup(&self, token: &str) -> AppResult<Option<RefreshToken>>;

    /// Inserts a new record, or replaces token string and expiry of an
    /// existing one.
    ///
    /// With `previous` set, the update only applies while the stored string
    /// still equals it; otherwise the call fails with `ErrorKind::Conflict`.
    async fn rotate(
        &self,
        record: &RefreshToken,
        previous: Option<&str>,
    ) -> AppResult<RefreshToken>;

    /// Deletes a record. Returns `true` if it existed.
    async fn delete(&self, record: &RefreshToken) -> AppResult<bool>;

    /// Deletes every record whose expiry lies before `now`.
    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Account>> {
        AccountRepository::find_by_id(self, id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        AccountRepository::find_by_email(self, email).await
    }

    async fn update_last_login(&self, id: i32, at: DateTime<Utc>) -> AppResult<()> {
        AccountRepository::update_last_login(self, id, at).await
    }
}

#[async_trait]
impl RefreshTokenStore for RefreshTokenRepository {
    async fn lookup(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        self.find_by_token(token).await
    }

    async fn rotate(
        &self,
        record: &RefreshToken,
        previous: Option<&str>,
    ) -> AppResult<RefreshToken> {
        if record.is_new() {
            return self.insert(record).await;
        }
        RefreshTokenRepository::rotate(self, record, previous)
            .await?
            .ok_or_else(|| AppError::conflict("refresh token was rotated or deleted concurrently"))
    }

    async fn delete(&self, record: &RefreshToken) -> AppResult<bool> {
        RefreshTokenRepository::delete(self, record.id).await
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        self.delete_expired(now).await
    }
}
