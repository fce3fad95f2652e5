//! Connected sessions and fan-out of auction events.
//!
//! Each registered session owns a bounded outbound channel drained by its
//! connection task. [`SessionRegistry::broadcast`] pushes one rendered line
//! into every channel without waiting. A channel whose receiver is gone, or
//! whose queue is full because the client stopped reading, is pruned on the
//! spot; dropping the sender ends that connection's session loop.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use super::{AuctionEvent, SessionId};

/// Role chosen at handshake, fixed for the session's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// May create auctions.
    Seller,
    /// May place bids.
    Buyer,
}

impl Role {
    /// Interprets a handshake answer: `yes` (any case) is a seller,
    /// anything else a buyer.
    #[must_use]
    pub fn from_answer(answer: &str) -> Self {
        if answer.trim().eq_ignore_ascii_case("yes") {
            Self::Seller
        } else {
            Self::Buyer
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seller => f.write_str("seller"),
            Self::Buyer => f.write_str("buyer"),
        }
    }
}

/// Default number of undelivered lines a session may queue before it is
/// considered lagging.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

#[derive(Debug)]
struct SessionEntry {
    identity: String,
    role: Role,
    outbound: mpsc::Sender<String>,
}

/// Connected-session counts by role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionCounts {
    /// Registered seller sessions.
    pub sellers: usize,
    /// Registered buyer sessions.
    pub buyers: usize,
}

impl SessionCounts {
    /// Total registered sessions.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.sellers + self.buyers
    }
}

/// Registry of every connected session.
///
/// Identities are display names and may repeat; every connection gets its
/// own entry and channel. The lock is never held across an `.await`.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
    queue_capacity: usize,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

impl SessionRegistry {
    /// Creates an empty registry whose sessions queue at most
    /// `queue_capacity` lines (minimum 1).
    #[must_use]
    pub fn new(queue_capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            queue_capacity: queue_capacity.max(1),
        }
    }

    /// Per-session outbound queue capacity.
    #[must_use]
    pub const fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    /// Adds a session and returns its identifier with the receiving end of
    /// its outbound channel.
    ///
    /// The receiver yields `None` once the session is deregistered or pruned.
    pub fn register(&self, identity: &str, role: Role) -> (SessionId, mpsc::Receiver<String>) {
        let (outbound, inbox) = mpsc::channel(self.queue_capacity);
        let session_id = SessionId::new();
        let entry = SessionEntry {
            identity: identity.to_string(),
            role,
            outbound,
        };
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session_id, entry);
        tracing::debug!(%session_id, identity, %role, "session registered");
        (session_id, inbox)
    }

    /// Removes a session. Returns `true` if it was still registered.
    pub fn deregister(&self, session_id: SessionId) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&session_id);
        if let Some(entry) = &removed {
            tracing::debug!(%session_id, identity = %entry.identity, "session deregistered");
        }
        removed.is_some()
    }

    /// Delivers `event` to every registered session.
    ///
    /// Returns the number of sessions that received it. Sessions whose
    /// connection has gone away or fallen too far behind are dropped from
    /// the registry.
    pub fn broadcast(&self, event: &AuctionEvent) -> usize {
        let delivered = self.broadcast_line(&event.to_string());
        tracing::debug!(
            event = event.event_type_str(),
            auction_id = %event.auction_id(),
            item = event.item(),
            delivered,
            "event broadcast"
        );
        delivered
    }

    /// Delivers a raw line to every registered session.
    pub fn broadcast_line(&self, line: &str) -> usize {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        sessions.retain(|session_id, entry| {
            match entry.outbound.try_send(line.to_string()) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(%session_id, identity = %entry.identity, "session lagging, pruned");
                    false
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!(%session_id, identity = %entry.identity, "stale session pruned");
                    false
                }
            }
        });
        sessions.len()
    }

    /// Returns the number of registered sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no session is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns registered session counts by role.
    #[must_use]
    pub fn counts(&self) -> SessionCounts {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions
            .values()
            .fold(SessionCounts::default(), |mut counts, entry| {
                match entry.role {
                    Role::Seller => counts.sellers += 1,
                    Role::Buyer => counts.buyers += 1,
                }
                counts
            })
    }
}
