//! Per-request access decision record
//!
//! Pure data: created once per request by the identity resolver, read by the
//! gate and by handlers, dropped with the request. Never shared across
//! concurrent requests and never derived from process-wide state.

use serde::Serialize;

/// An authenticated principal capable of owning resources.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Identity {
    /// Immutable identifier, fixed at registration.
    pub id: i64,
    pub username: String,
}

/// Resolved authentication state for one request.
#[derive(Debug, Clone, Default)]
pub struct AccessDecision {
    identity: Option<Identity>,
}

impl AccessDecision {
    /// No credential material was attached to the request. Not an error:
    /// anonymous access is valid for public operations.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Credential material verified and resolved to an existing identity.
    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// The resolved identity, if the request is authenticated.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_decision_has_no_identity() {
        assert!(AccessDecision::anonymous().identity().is_none());
    }

    #[test]
    fn test_authenticated_decision_exposes_identity() {
        let decision = AccessDecision::authenticated(Identity {
            id: 5,
            username: "alice".to_string(),
        });
        assert_eq!(decision.identity().unwrap().id, 5);
    }
}
