//! Health check handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::error;

use crate::dto::ReadinessResponse;
use crate::state::AppState;

/// GET /ping
pub async fn ping() -> &'static str {
    "pong"
}

/// GET /ready
///
/// 200 once the database is reachable and migrated, 503 otherwise.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let (status, database) = match state.readiness.is_ready().await {
        Ok(true) => (StatusCode::OK, "ready"),
        Ok(false) => (StatusCode::SERVICE_UNAVAILABLE, "not migrated"),
        Err(e) => {
            error!(error = %e, "Readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unreachable")
        }
    };

    (status, Json(ReadinessResponse::new(status, database)))
}
