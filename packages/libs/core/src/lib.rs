//! pinboard-core: shared auth/authz core for the pinboard API
//!
//! This crate decides *who* is calling and *what* they may touch, without
//! knowing anything about HTTP routing or SQL itself. The service crate
//! wires these pieces into middleware and handlers.
//!
//! # Module structure
//!
//! - `auth`: token issuance/verification and password hashing
//! - `permissions`: the per-request access decision and the authorization gate
//! - `error`: the single error channel crossing component boundaries

pub mod auth;
pub mod error;
pub mod permissions;

pub use error::{Error, Result};
