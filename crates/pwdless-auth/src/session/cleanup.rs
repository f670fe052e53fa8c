//! Expired refresh record cleanup.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use pwdless_core::result::AppResult;

use super::store::RefreshTokenStore;

/// Deletes refresh records whose expiry has passed.
#[derive(Clone)]
pub struct SessionCleanup {
    refresh_tokens: Arc<dyn RefreshTokenStore>,
}

impl std::fmt::Debug for SessionCleanup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCleanup").finish()
    }
}

impl SessionCleanup {
    /// Creates a new cleanup handler.
    pub fn new(refresh_tokens: Arc<dyn RefreshTokenStore>) -> Self {
        Self { refresh_tokens }
    }

    /// Runs one cleanup cycle and returns the number of records deleted.
    pub async fn run_cleanup(&self) -> AppResult<u64> {
        let purged = self.refresh_tokens.purge_expired(Utc::now()).await?;
        if purged > 0 {
            info!(purged, "Purged expired refresh tokens");
        }
        Ok(purged)
    }
}
