//! `/post` handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use pinboard_core::permissions::AccessDecision;
use pinboard_core::Error;

use crate::db::PostRow;
use crate::error::Result;
use crate::schema::{CreatePost, UpdatePost};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<PostRow>>> {
    Ok(Json(state.store.list_posts().await?))
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<PostRow>> {
    Ok(Json(state.store.get_post(id).await?))
}

/// Creation fixes the owner to the caller's identity; there is no way to
/// create a post on someone else's behalf.
pub async fn create(
    State(state): State<AppState>,
    Extension(decision): Extension<AccessDecision>,
    Json(payload): Json<CreatePost>,
) -> Result<(StatusCode, Json<PostRow>)> {
    payload.validate()?;

    // The gate has already required authentication for this route.
    let identity = decision.identity().ok_or(Error::Unauthenticated)?;

    let post = state
        .store
        .create_post(identity.id, &payload.title, &payload.body)
        .await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePost>,
) -> Result<Json<PostRow>> {
    payload.validate()?;

    let post = state
        .store
        .update_post(id, payload.title.as_deref(), payload.body.as_deref())
        .await?;
    Ok(Json(post))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    state.store.delete_post(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
