//! Domain layer: auctions, sessions, and the events between them.
//!
//! This module contains the server-side domain model: auction and session
//! identity, the auction record with its resolution rule, the auction
//! registry for concurrent item storage, and the session registry that fans
//! events out to every connected client.

pub mod auction;
pub mod auction_event;
pub mod auction_registry;
pub mod ids;
pub mod session_registry;

pub use auction::{Auction, AuctionStatus, AuctionSummary, AuctionType, NO_BIDS_YET, Outcome};
pub use auction_event::AuctionEvent;
pub use auction_registry::AuctionRegistry;
pub use ids::{AuctionId, SessionId};
pub use session_registry::{DEFAULT_QUEUE_CAPACITY, Role, SessionCounts, SessionRegistry};
