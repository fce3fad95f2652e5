//! Type-safe auction and session identifiers.
//!
//! Both are newtype wrappers around [`uuid::Uuid`] (v4) so that an auction
//! instance can never be confused with a connected session.

use std::fmt;

/// Unique identifier for one auction instance.
///
/// Item names are reused once an auction is removed; the `AuctionId`
/// distinguishes the successive auctions for the same item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuctionId(uuid::Uuid);

impl AuctionId {
    /// Creates a new random `AuctionId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for AuctionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AuctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for one registered connection.
///
/// Display names are not unique, so the session registry is keyed by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(uuid::Uuid);

impl SessionId {
    /// Creates a new random `SessionId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
