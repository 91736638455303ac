//! Password hashing
//!
//! bcrypt hashing for stored secrets and constant-time comparison for the
//! login flow. Plaintext passwords never leave this module's callers.

use crate::error::{Error, Result};

/// Hash a plaintext password for storage.
pub fn hash_password(plain: &str) -> Result<String> {
    bcrypt::hash(plain, bcrypt::DEFAULT_COST).map_err(|e| Error::Internal {
        message: format!("password hashing failed: {e}"),
    })
}

/// Compare a plaintext password against a stored hash.
///
/// An undecodable stored hash counts as a mismatch rather than an error, so
/// the login flow fails closed.
pub fn verify_password(plain: &str, stored_hash: &str) -> bool {
    bcrypt::verify(plain, stored_hash).unwrap_or(false)
}
