//! Route definitions for the HTTP API.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the router with all routes, threading `AppState` through
/// every handler.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(account_routes())
        .merge(admin_routes())
        .merge(health_routes())
        .with_state(state)
}

/// Passwordless flow: login, token exchange, refresh, logout
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/token", post(handlers::auth::token))
        .route("/refresh", post(handlers::auth::refresh))
        .route("/logout", post(handlers::auth::logout))
}

/// Self-service endpoints behind the access token
fn account_routes() -> Router<AppState> {
    Router::new().route("/api/account", get(handlers::account::get_own_account))
}

/// Admin endpoints (role `admin`)
fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/accounts/{id}", get(handlers::account::get_account))
}

/// Liveness and readiness
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/ping", get(handlers::health::ping))
        .route("/ready", get(handlers::health::ready))
}
