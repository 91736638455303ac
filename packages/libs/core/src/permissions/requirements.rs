//! Operation requirements
//!
//! The declared requirement pair each resource operation is registered with.

/// What a wrapped operation demands of the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Requirements {
    /// Caller must be authenticated.
    pub auth: bool,

    /// Caller must own the addressed resource. Implies `auth`: an ownership
    /// check without an authenticated identity fails as unauthenticated,
    /// never as forbidden.
    pub owner: bool,
}

impl Requirements {
    /// No checks: the operation proceeds unconditionally.
    pub const PUBLIC: Self = Self {
        auth: false,
        owner: false,
    };

    /// Authenticated caller required, no ownership test.
    pub const AUTHENTICATED: Self = Self {
        auth: true,
        owner: false,
    };

    /// Authenticated caller who owns the addressed resource. For creation
    /// (no addressed resource yet) this degrades to an authentication check
    /// and the handler fixes owner = caller.
    pub const OWNER: Self = Self {
        auth: true,
        owner: true,
    };

    /// Whether no check runs at all.
    pub fn is_unrestricted(&self) -> bool {
        !self.auth && !self.owner
    }
}
