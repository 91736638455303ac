//! `/account` handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use pinboard_core::auth::password;

use crate::db::AccountRow;
use crate::error::Result;
use crate::schema::{CreateAccount, UpdateAccount};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<AccountRow>>> {
    Ok(Json(state.store.list_accounts().await?))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AccountRow>> {
    Ok(Json(state.store.get_account(id).await?))
}

/// Registration. Public: this is how identities come into existence. The
/// response carries the new account, never a token; logging in is a
/// separate step.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateAccount>,
) -> Result<(StatusCode, Json<AccountRow>)> {
    payload.validate()?;

    let hash = password::hash_password(&payload.password)?;
    let account = state.store.create_account(&payload.username, &hash).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAccount>,
) -> Result<Json<AccountRow>> {
    payload.validate()?;

    // A changed password is rehashed before it ever reaches the store.
    let hash = payload
        .password
        .as_deref()
        .map(password::hash_password)
        .transpose()?;

    let account = state
        .store
        .update_account(id, payload.username.as_deref(), hash.as_deref())
        .await?;
    Ok(Json(account))
}

/// Deletes the account and, through the cascade, every post it owns.
pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    state.store.delete_account(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
