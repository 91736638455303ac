//! `/login` handler
//!
//! Exchanges HTTP Basic credentials for a signed bearer token. Every
//! failure path — missing header, unknown username, wrong password — is
//! the same 401, so the response never reveals whether a username exists.

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;

use pinboard_core::auth::password;
use pinboard_core::permissions::Identity;
use pinboard_core::Error;

use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<TokenResponse>)> {
    let (username, supplied) =
        basic_credentials(&headers).ok_or(Error::Unauthenticated)?;

    let account = state
        .store
        .find_account_by_username(&username)
        .await?
        .ok_or(Error::Unauthenticated)?;

    if !password::verify_password(&supplied, &account.password_hash) {
        return Err(Error::Unauthenticated.into());
    }

    let token = state.codec.issue(&Identity {
        id: account.id,
        username: account.username,
    })?;

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// Parse an `Authorization: Basic <base64(user:pass)>` header.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded).ok()?;
    let text = String::from_utf8(decoded).ok()?;
    let (username, supplied) = text.split_once(':')?;
    Some((username.to_string(), supplied.to_string()))
}
