//! Refresh token repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use pwdless_core::error::{AppError, ErrorKind};
use pwdless_core::result::AppResult;
use pwdless_entity::token::RefreshToken;

/// Repository for durable refresh token records (`tokens` table).
#[derive(Debug, Clone)]
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    /// Create a new refresh token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a record by its opaque token string.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        sqlx::query_as::<_, RefreshToken>("SELECT * FROM tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find refresh token", e)
            })
    }

    /// Insert a new record and return it with its assigned identity.
    pub async fn insert(&self, token: &RefreshToken) -> AppResult<RefreshToken> {
        sqlx::query_as::<_, RefreshToken>(
            "INSERT INTO tokens \
             (created_at, updated_at, account_id, token, expiry, mobile, identifier) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(token.created_at)
        .bind(token.updated_at)
        .bind(token.account_id)
        .bind(&token.token)
        .bind(token.expiry)
        .bind(token.mobile)
        .bind(&token.identifier)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert refresh token", e)
        })
    }

    /// Replace token string and expiry in place.
    ///
    /// When `previous` is given the update only applies if the stored
    /// string still matches it. Returns `None` if no row was updated.
    pub async fn rotate(
        &self,
        token: &RefreshToken,
        previous: Option<&str>,
    ) -> AppResult<Option<RefreshToken>> {
        sqlx::query_as::<_, RefreshToken>(
            "UPDATE tokens SET token = $2, expiry = $3, updated_at = $4 \
             WHERE id = $1 AND ($5::TEXT IS NULL OR token = $5) RETURNING *",
        )
        .bind(token.id)
        .bind(&token.token)
        .bind(token.expiry)
        .bind(token.updated_at)
        .bind(previous)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to rotate refresh token", e)
        })
    }

    /// Delete a record by ID. Returns `true` if a row was removed.
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tokens WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete refresh token", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every record whose expiry lies before `now`.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM tokens WHERE expiry < $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge expired tokens", e)
            })?;
        Ok(result.rows_affected())
    }
}
