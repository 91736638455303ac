//! Access decisions and the authorization gate
//!
//! # Overview
//!
//! Every request carries exactly one [`AccessDecision`], created by the
//! service's identity resolver before any handler logic runs. Route
//! registration declares [`Requirements`] per operation, and the gate
//! enforces them against the decision and, for ownership-gated operations,
//! against the resource-kind-specific ownership predicate.
//!
//! # Module structure
//!
//! - `context`: the per-request access decision record
//! - `requirements`: the declared requirement pair per operation
//! - `gate`: resource kinds, ownership lookup, and enforcement

mod context;
mod gate;
mod requirements;

pub use context::{AccessDecision, Identity};
pub use gate::{enforce, OwnershipLookup, ResourceKind};
pub use requirements::Requirements;
