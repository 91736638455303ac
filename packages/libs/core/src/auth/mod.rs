//! Authentication types and logic
//!
//! # Overview
//!
//! Pinboard authenticates callers with a signed, time-bound bearer token
//! (JWT, HS256). Tokens are stateless: validity is wholly determined by the
//! signature and the embedded expiry at verification time, nothing is stored
//! server-side.
//!
//! - `claims`: the payload a token encodes
//! - `token`: the codec issuing and verifying tokens
//! - `password`: hashing and constant-time comparison of login secrets

mod claims;
pub mod password;
mod token;

pub use claims::AccessClaims;
pub use token::{TokenCodec, TOKEN_TTL_SECS};
