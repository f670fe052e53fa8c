//! Application state shared across all handlers.

use std::sync::Arc;

use pwdless_auth::{AccountStore, SessionManager, TokenAuth};
use pwdless_core::config::AppConfig;

use crate::readiness::ReadinessCheck;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Session orchestrator
    pub session_manager: Arc<SessionManager>,
    /// Token verifier used by the bearer extractors
    pub token_auth: Arc<TokenAuth>,
    /// Account lookups for the account routes
    pub accounts: Arc<dyn AccountStore>,
    /// Backing store check for `/ready`
    pub readiness: Arc<dyn ReadinessCheck>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("session_manager", &self.session_manager)
            .finish()
    }
}

impl AppState {
    /// Builds the state; the token verifier is shared with the session manager.
    pub fn new(
        config: Arc<AppConfig>,
        session_manager: Arc<SessionManager>,
        accounts: Arc<dyn AccountStore>,
        readiness: Arc<dyn ReadinessCheck>,
    ) -> Self {
        let token_auth = Arc::clone(session_manager.token_auth());
        Self {
            config,
            session_manager,
            token_auth,
            accounts,
            readiness,
        }
    }
}
