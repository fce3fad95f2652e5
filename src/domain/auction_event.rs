//! Domain events reflecting auction state changes.
//!
//! Every accepted mutation emits an [`AuctionEvent`] through the
//! [`super::SessionRegistry`]. The `Display` impl is the exact line every
//! connected client receives.

use std::fmt;

use super::{AuctionId, AuctionType, Outcome};

/// Event broadcast to every registered session after a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuctionEvent {
    /// A seller created a new auction.
    AuctionStarted {
        /// Auction identifier.
        auction_id: AuctionId,
        /// Item name.
        item: String,
        /// Auction format.
        auction_type: AuctionType,
    },

    /// A bid became the new highest bid.
    BidAccepted {
        /// Auction identifier.
        auction_id: AuctionId,
        /// Item name.
        item: String,
        /// Bidder identity.
        bidder: String,
        /// Accepted amount.
        amount: i64,
    },

    /// The countdown elapsed and the auction was resolved.
    AuctionResolved {
        /// Auction identifier.
        auction_id: AuctionId,
        /// Item name.
        item: String,
        /// Winner or unsold.
        outcome: Outcome,
    },
}

impl AuctionEvent {
    /// Returns the auction ID associated with this event.
    #[must_use]
    pub const fn auction_id(&self) -> AuctionId {
        match self {
            Self::AuctionStarted { auction_id, .. }
            | Self::BidAccepted { auction_id, .. }
            | Self::AuctionResolved { auction_id, .. } => *auction_id,
        }
    }

    /// Returns the item name associated with this event.
    #[must_use]
    pub fn item(&self) -> &str {
        match self {
            Self::AuctionStarted { item, .. }
            | Self::BidAccepted { item, .. }
            | Self::AuctionResolved { item, .. } => item,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::AuctionStarted { .. } => "auction_started",
            Self::BidAccepted { .. } => "bid_accepted",
            Self::AuctionResolved { .. } => "auction_resolved",
        }
    }
}

impl fmt::Display for AuctionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuctionStarted {
                item, auction_type, ..
            } => write!(f, "New auction started: {item} (Type: {auction_type})"),
            Self::BidAccepted {
                item,
                bidder,
                amount,
                ..
            } => write!(f, "New highest bid for {item}: {amount} by {bidder}"),
            // Resolution lines do not name the item; clients match on wording.
            Self::AuctionResolved {
                outcome: Outcome::Won { bidder, amount },
                ..
            } => write!(f, "Auction for item ended! Winner: {bidder} for {amount}"),
            Self::AuctionResolved {
                outcome: Outcome::Unsold,
                ..
            } => f.write_str("Auction ended! No winning bid, reserve price was not met."),
        }
    }
}
