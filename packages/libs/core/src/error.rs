//! Common error type
//!
//! Every failure in the auth/authz core and in input validation funnels into
//! this single enum. Only the transport boundary in the service crate turns
//! it into a wire response; nothing below that boundary catches and
//! reinterprets another component's error.

use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// One field-level validation problem.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldProblem {
    pub field: String,
    pub message: String,
}

impl FieldProblem {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Pinboard common error
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed, badly signed, or expired token. Deliberately one variant:
    /// the caller is never told which of the three it was.
    #[error("the provided authorization token is invalid")]
    InvalidToken,

    /// No credential where one is required, or an ownership check attempted
    /// with no resolved identity.
    #[error("authorization credentials were not provided")]
    Unauthenticated,

    /// Authenticated identity does not own the addressed resource.
    #[error("{reason}")]
    Forbidden { reason: String },

    #[error("{what} with id={id} not found")]
    NotFound { what: &'static str, id: i64 },

    /// A uniqueness constraint on the persistence layer was violated.
    #[error("{what} already exists")]
    Conflict { what: &'static str },

    /// Structured list of field-level input problems.
    #[error("validation failed")]
    Validation(Vec<FieldProblem>),

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl Error {
    /// HTTP status class for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidToken | Error::Unauthenticated => 401,
            Error::Forbidden { .. } => 403,
            Error::NotFound { .. } => 404,
            Error::Conflict { .. } => 409,
            Error::Validation(_) => 400,
            Error::Internal { .. } => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::InvalidToken.status_code(), 401);
        assert_eq!(Error::Unauthenticated.status_code(), 401);
        assert_eq!(
            Error::Forbidden {
                reason: "nope".to_string()
            }
            .status_code(),
            403
        );
        assert_eq!(
            Error::NotFound {
                what: "post",
                id: 7
            }
            .status_code(),
            404
        );
        assert_eq!(Error::Conflict { what: "account" }.status_code(), 409);
        assert_eq!(Error::Validation(vec![]).status_code(), 400);
    }

    #[test]
    fn test_invalid_token_message_is_uniform() {
        // Expired and malformed tokens must surface the same message.
        assert_eq!(
            Error::InvalidToken.to_string(),
            "the provided authorization token is invalid"
        );
    }
}
