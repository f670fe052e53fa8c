//! Expired refresh token purge.

use pwdless_auth::SessionCleanup;

/// Runs one purge cycle per tick. Failures are logged and the next tick
/// runs as usual.
#[derive(Debug, Clone)]
pub struct PurgeJob {
    cleanup: SessionCleanup,
}

impl PurgeJob {
    /// Create a new purge job
    pub fn new(cleanup: SessionCleanup) -> Self {
        Self { cleanup }
    }

    /// Run one cycle, returning the number of purged records.
    pub async fn run(&self) -> Option<u64> {
        tracing::debug!("Running refresh token purge");
        match self.cleanup.run_cleanup().await {
            Ok(purged) => Some(purged),
            Err(e) => {
                tracing::error!(error = %e, "Refresh token purge failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};

    use pwdless_auth::{MemoryRefreshTokenStore, RefreshTokenStore};
    use pwdless_core::{AppError, AppResult};
    use pwdless_entity::token::RefreshToken;

    use super::*;

    #[derive(Default)]
    struct UnreachableStore {
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl RefreshTokenStore for UnreachableStore {
        async fn lookup(&self, _token: &str) -> AppResult<Option<RefreshToken>> {
            Ok(None)
        }

        async fn rotate(
            &self,
            record: &RefreshToken,
            _previous: Option<&str>,
        ) -> AppResult<RefreshToken> {
            Ok(record.clone())
        }

        async fn delete(&self, _record: &RefreshToken) -> AppResult<bool> {
            Ok(false)
        }

        async fn purge_expired(&self, _now: DateTime<Utc>) -> AppResult<u64> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(AppError::database("connection refused"))
        }
    }

    #[tokio::test]
    async fn test_purge_removes_expired() {
        let store = MemoryRefreshTokenStore::new();
        store
            .rotate(
                &RefreshToken::new(1, "old".into(), Utc::now() - Duration::minutes(5), false, None),
                None,
            )
            .await
            .unwrap();

        let job = PurgeJob::new(SessionCleanup::new(Arc::new(store.clone())));
        assert_eq!(job.run().await, Some(1));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_failure_is_not_fatal() {
        let store = Arc::new(UnreachableStore::default());
        let job = PurgeJob::new(SessionCleanup::new(store.clone()));

        assert_eq!(job.run().await, None);
        assert_eq!(job.run().await, None);
        assert_eq!(store.attempts.load(Ordering::SeqCst), 2);
    }
}
