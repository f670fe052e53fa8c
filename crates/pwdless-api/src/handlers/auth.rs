//! Auth handlers: login, token exchange, refresh, logout.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};

use crate::dto::{LoginRequest, TokenRequest, TokenResponse};
use crate::error::ApiError;
use crate::extractors::RefreshAuth;
use crate::state::AppState;

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(req) = payload?;
    state.session_manager.login(&req.email).await?;
    Ok(StatusCode::OK)
}

/// POST /token
pub async fn token(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(req) = payload?;
    let user_agent = headers.get(USER_AGENT).and_then(|v| v.to_str().ok());

    let pair = state.session_manager.exchange(&req.token, user_agent).await?;
    Ok(Json(pair.into()))
}

/// POST /refresh
pub async fn refresh(
    State(state): State<AppState>,
    RefreshAuth(claims): RefreshAuth,
) -> Result<Json<TokenResponse>, ApiError> {
    let pair = state.session_manager.refresh(&claims).await?;
    Ok(Json(pair.into()))
}

/// POST /logout
pub async fn logout(
    State(state): State<AppState>,
    RefreshAuth(claims): RefreshAuth,
) -> Result<StatusCode, ApiError> {
    state.session_manager.logout(&claims).await?;
    Ok(StatusCode::OK)
}
