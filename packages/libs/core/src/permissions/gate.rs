//! Authorization gate
//!
//! Enforces declared [`Requirements`] against the request's
//! [`AccessDecision`] and, for ownership-gated operations, against the
//! resource-kind-specific ownership predicate. All failures here are
//! terminal for the request and short-circuit before the wrapped operation
//! body runs.

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::context::{AccessDecision, Identity};
use super::requirements::Requirements;

/// The closed set of resource kinds the gate can test ownership for.
///
/// Each variant carries its own ownership predicate; the gate itself stays
/// generic over kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Account,
    Post,
}

impl ResourceKind {
    fn denial(&self) -> &'static str {
        match self {
            ResourceKind::Account => "you can only make changes to your own account",
            ResourceKind::Post => "you can only make changes to your own posts",
        }
    }

    /// Does `identity` own the instance of this kind with primary key `id`?
    ///
    /// An account is owned by itself; a post is owned by the account whose id
    /// is recorded as its owner. A lookup miss (the instance does not exist)
    /// counts as not owned.
    pub async fn owned_by<S>(&self, store: &S, identity: &Identity, id: i64) -> Result<bool>
    where
        S: OwnershipLookup + ?Sized,
    {
        match self {
            ResourceKind::Account => Ok(identity.id == id),
            ResourceKind::Post => Ok(store.post_owner(id).await? == Some(identity.id)),
        }
    }
}

/// Persistence-side lookup the ownership predicates need.
///
/// Implemented by the service's store; stubbed in tests.
#[async_trait]
pub trait OwnershipLookup: Send + Sync {
    /// Owner account id of a post, or `None` if the post does not exist.
    async fn post_owner(&self, post_id: i64) -> Result<Option<i64>>;
}

/// Evaluate the gate for one operation call.
///
/// `target` is the addressed resource's primary key when the call carries
/// one (update/delete by id); `None` for creation, where ownership cannot be
/// tested against an existing instance and authentication alone is required.
///
/// Evaluation order:
/// 1. unrestricted requirements pass without any check;
/// 2. an unauthenticated caller fails [`Error::Unauthenticated`], never
///    [`Error::Forbidden`];
/// 3. an authenticated non-owner fails [`Error::Forbidden`].
pub async fn enforce<S>(
    requirements: Requirements,
    decision: &AccessDecision,
    kind: ResourceKind,
    target: Option<i64>,
    store: &S,
) -> Result<()>
where
    S: OwnershipLookup + ?Sized,
{
    if requirements.is_unrestricted() {
        return Ok(());
    }

    let identity = decision.identity().ok_or(Error::Unauthenticated)?;

    if requirements.owner {
        if let Some(id) = target {
            if !kind.owned_by(store, identity, id).await? {
                return Err(Error::Forbidden {
                    reason: kind.denial().to_string(),
                });
            }
        }
        // No target: the resource does not exist yet. The authentication
        // check above is the whole gate; the handler fixes owner = caller.
    }

    Ok(())
}
