//! Service middleware
//!
//! - `request_id`: tags every request/response for log correlation
//! - `authenticate`: the identity resolver, run once per request before any
//!   handler logic
//! - `gate`: the per-route authorization layer

mod gate;

pub use gate::GateLayer;

use axum::extract::{Request, State};
use axum::http::{header, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

use pinboard_core::permissions::{AccessDecision, Identity};
use pinboard_core::Error;

use crate::error::ApiError;
use crate::state::AppState;

/// Tag the request with a fresh id, carried through logs and echoed in the
/// `x-request-id` response header.
pub async fn request_id(request: Request, next: Next) -> Response {
    let id = Uuid::new_v4().to_string();
    let span = tracing::info_span!("request", request_id = %id);

    let mut response = next.run(request).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}

/// Identity resolver.
///
/// Runs unconditionally for every request, including public endpoints, so
/// handlers may use the identity for personalization even where the gate
/// requires nothing.
///
/// - no bearer credential: the request proceeds anonymously;
/// - bearer present but invalid: terminal 401, never falls through to
///   anonymous;
/// - bearer valid but the subject no longer exists (account deleted after
///   issuance): terminal 401 as unauthenticated.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let decision = match bearer {
        None => AccessDecision::anonymous(),
        Some(token) => {
            let claims = state.codec.verify(token)?;
            let account = state
                .store
                .find_account(claims.sub)
                .await?
                .ok_or(Error::Unauthenticated)?;
            AccessDecision::authenticated(Identity {
                id: account.id,
                username: account.username,
            })
        }
    };

    request.extensions_mut().insert(decision);
    Ok(next.run(request).await)
}
