//! Account handlers behind the access token gate.

use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};

use pwdless_core::error::AppError;

use crate::dto::AccountResponse;
use crate::error::ApiError;
use crate::extractors::AccessAuth;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/account
pub async fn get_own_account(
    State(state): State<AppState>,
    auth: AccessAuth,
) -> Result<Json<AccountResponse>, ApiError> {
    find_account(&state, auth.id).await
}

/// GET /admin/accounts/{id}
pub async fn get_account(
    State(state): State<AppState>,
    auth: AccessAuth,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<AccountResponse>, ApiError> {
    require_admin(&auth)?;
    let Path(id) = path?;
    find_account(&state, id).await
}

async fn find_account(state: &AppState, id: i32) -> Result<Json<AccountResponse>, ApiError> {
    let account = state
        .accounts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("account not found"))?;
    Ok(Json(account.into()))
}
