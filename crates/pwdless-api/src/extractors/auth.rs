//! Bearer token extractors for the access and refresh gates.
//!
//! Both verify signature, expiry and claim shape only. Whether a refresh
//! token still has a live record is decided by the session manager.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::warn;

use pwdless_auth::{AccessClaims, AuthError, RefreshClaims};

use crate::error::ApiError;
use crate::state::AppState;

/// Verified access token claims.
#[derive(Debug, Clone)]
pub struct AccessAuth(pub AccessClaims);

/// Verified refresh token claims.
#[derive(Debug, Clone)]
pub struct RefreshAuth(pub RefreshClaims);

impl std::ops::Deref for AccessAuth {
    type Target = AccessClaims;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AccessAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state.token_auth.verify_access(token).inspect_err(|e| {
            warn!(path = %parts.uri.path(), error = %e, "Access token rejected");
        })?;
        Ok(Self(claims))
    }
}

impl FromRequestParts<AppState> for RefreshAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state.token_auth.verify_refresh(token).inspect_err(|e| {
            warn!(path = %parts.uri.path(), error = %e, "Refresh token rejected");
        })?;
        Ok(Self(claims))
    }
}

/// Pulls the token from `Authorization: Bearer <token>`; the scheme is
/// matched case-insensitively.
fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::TokenUnauthorized)?;

    let (scheme, token) = header
        .trim()
        .split_once(' ')
        .ok_or(AuthError::TokenUnauthorized)?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::TokenUnauthorized);
    }
    Ok(token)
}
