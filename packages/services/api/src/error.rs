//! API error type
//!
//! The transport boundary: the only place a core error is turned into a wire
//! response. Failure responses are `{"error": <message-or-list>}` with the
//! status class the core error carries.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

/// API error
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] pinboard_core::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Error response JSON: `{"error": <message-or-list>}`.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: Value,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, payload) = match self {
            ApiError::Core(pinboard_core::Error::Validation(problems)) => (
                StatusCode::BAD_REQUEST,
                json!(problems),
            ),
            ApiError::Core(e) => {
                let status = StatusCode::from_u16(e.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if status.is_server_error() {
                    tracing::error!("internal error: {e}");
                }
                (status, json!(e.to_string()))
            }
            ApiError::Database(e) => {
                tracing::error!("database error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!("database operation failed"),
                )
            }
        };

        (status, Json(ErrorResponse { error: payload })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
