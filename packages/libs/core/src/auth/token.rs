//! Token codec
//!
//! Issues and verifies the signed bearer token (JWT, HS256). The signing
//! secret is process-wide configuration: the codec is built once at startup
//! and never mutated afterwards, so it can be shared freely across requests.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::error::{Error, Result};
use crate::permissions::Identity;

use super::claims::AccessClaims;

/// Fixed token lifetime: 60 minutes from issuance. Policy constant, not
/// configurable per call.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Token codec
///
/// Pure function of the secret key and the clock; no side effects.
pub struct TokenCodec {
    header: Header,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// New codec from the process-wide signing secret.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            header: Header::new(Algorithm::HS256),
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token for an identity, expiring [`TOKEN_TTL_SECS`] from now.
    pub fn issue(&self, identity: &Identity) -> Result<String> {
        let claims = AccessClaims::new(identity.id, TOKEN_TTL_SECS);
        jsonwebtoken::encode(&self.header, &claims, &self.encoding).map_err(|e| Error::Internal {
            message: format!("token encoding failed: {e}"),
        })
    }

    /// Verify a token and return its claims.
    ///
    /// Malformed input, a bad signature, and expiry all collapse into the
    /// single [`Error::InvalidToken`] kind: the caller is never told which
    /// failure mode occurred.
    pub fn verify(&self, token: &str) -> Result<AccessClaims> {
        let claims =
            jsonwebtoken::decode::<AccessClaims>(token, &self.decoding, &self.validation)
                .map(|data| data.claims)
                .map_err(|_| Error::InvalidToken)?;

        // The library accepts `exp == now`; here the expiry instant itself
        // is already expired.
        if claims.is_expired() {
            return Err(Error::InvalidToken);
        }

        Ok(claims)
    }
}
