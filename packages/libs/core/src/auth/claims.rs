//! Token claims
//!
//! Payload structure of the access token.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Access token claims (JWT payload).
///
/// `exp` is checked by the codec during verification; an expired token is
/// reported as invalid, indistinguishable from a malformed one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the account id this token was issued for.
    pub sub: i64,

    /// Issued-at (unix seconds).
    pub iat: i64,

    /// Expiry (unix seconds).
    pub exp: i64,
}

impl AccessClaims {
    /// New claims for a subject, expiring `ttl_seconds` from now.
    pub fn new(sub: i64, ttl_seconds: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub,
            iat: now,
            exp: now + ttl_seconds,
        }
    }

    /// Whether the expiry instant has passed.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_claims_not_expired() {
        let claims = AccessClaims::new(1, 3600);
        assert!(!claims.is_expired());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let claims = AccessClaims::new(1, -10);
        assert!(claims.is_expired());
    }
}
