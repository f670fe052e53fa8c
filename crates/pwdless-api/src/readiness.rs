//! Readiness of the backing store, reported by `GET /ready`.

use async_trait::async_trait;

use pwdless_core::result::AppResult;
use pwdless_database::DatabasePool;

/// Reports whether the service can serve sessions.
#[async_trait]
pub trait ReadinessCheck: Send + Sync {
    /// `Ok(false)` when reachable but not usable; `Err` when unreachable.
    async fn is_ready(&self) -> AppResult<bool>;
}

#[async_trait]
impl ReadinessCheck for DatabasePool {
    async fn is_ready(&self) -> AppResult<bool> {
        self.schema_ready().await
    }
}
