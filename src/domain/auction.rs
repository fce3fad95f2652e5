//! A single item's bidding state and its resolution rule.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

use super::AuctionId;
use crate::error::AuctionError;

/// Bidder shown while an auction has no accepted bid.
pub const NO_BIDS_YET: &str = "No bids yet";

/// Auction format chosen by the seller.
///
/// Stored and announced, but every format currently follows the same
/// open-ascending bidding and resolution rules. Labels outside the known
/// formats are kept verbatim so the announcement echoes what the seller typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuctionType {
    /// Open ascending auction.
    Standard,
    /// Sealed-bid auction.
    SealedBid,
    /// Any other seller-supplied label.
    Other(String),
}

impl AuctionType {
    /// Short machine-readable tag for logs and the status API.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::SealedBid => "sealed_bid",
            Self::Other(_) => "other",
        }
    }
}

impl From<&str> for AuctionType {
    /// Recognizes `Standard`, `Sealed Bid` and `SealedBid` ignoring case and
    /// whitespace. Anything else becomes [`AuctionType::Other`] with the
    /// trimmed label.
    fn from(label: &str) -> Self {
        let label = label.trim();
        let normalized: String = label
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "standard" => Self::Standard,
            "sealedbid" => Self::SealedBid,
            _ => Self::Other(label.to_string()),
        }
    }
}

impl fmt::Display for AuctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => f.write_str("Standard"),
            Self::SealedBid => f.write_str("Sealed Bid"),
            Self::Other(label) => f.write_str(label),
        }
    }
}

/// Lifecycle state of an auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuctionStatus {
    /// Accepting bids.
    Open,
    /// Countdown elapsed; outcome decided.
    Resolved,
}

/// Result of resolving an auction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Highest bid met the reserve price.
    Won {
        /// Identity of the winning bidder.
        bidder: String,
        /// Winning amount.
        amount: i64,
    },
    /// No bid met the reserve price.
    Unsold,
}

/// Bidding state for one item.
///
/// `item`, `reserve_price`, `auction_type` and the timestamps are fixed at
/// creation. The highest bid only moves up while the auction is open.
#[derive(Debug)]
pub struct Auction {
    /// Unique auction identifier.
    pub auction_id: AuctionId,

    /// Case-sensitive item name; the registry key.
    pub item: String,

    /// Minimum winning bid.
    pub reserve_price: i64,

    /// Seller-chosen auction format.
    pub auction_type: AuctionType,

    /// Wall-clock creation time.
    pub created_at: DateTime<Utc>,

    /// Wall-clock time at which the countdown elapses.
    pub ends_at: DateTime<Utc>,

    deadline: Instant,
    highest_bid: i64,
    highest_bidder: Option<String>,
    status: AuctionStatus,
}

impl Auction {
    /// Creates an open auction whose countdown ends `duration` from now.
    #[must_use]
    pub fn new(
        item: String,
        reserve_price: i64,
        auction_type: AuctionType,
        duration: Duration,
    ) -> Self {
        let created_at = Utc::now();
        let ends_at = chrono::Duration::from_std(duration)
            .ok()
            .and_then(|d| created_at.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            auction_id: AuctionId::new(),
            item,
            reserve_price,
            auction_type,
            created_at,
            ends_at,
            deadline: Instant::now() + duration,
            highest_bid: 0,
            highest_bidder: None,
            status: AuctionStatus::Open,
        }
    }

    /// Monotonic instant at which the countdown elapses.
    #[must_use]
    pub const fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Current highest bid (0 before any bid).
    #[must_use]
    pub const fn highest_bid(&self) -> i64 {
        self.highest_bid
    }

    /// Identity of the current highest bidder, if any.
    #[must_use]
    pub fn highest_bidder(&self) -> Option<&str> {
        self.highest_bidder.as_deref()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> AuctionStatus {
        self.status
    }

    /// Returns `true` if a bid arriving at `now` could be accepted.
    ///
    /// Past the deadline the auction counts as closed even if the timer
    /// task has not run yet.
    #[must_use]
    pub fn is_open_at(&self, now: Instant) -> bool {
        self.status == AuctionStatus::Open && now < self.deadline
    }

    /// Records `amount` from `bidder` if it strictly beats the highest bid.
    ///
    /// # Errors
    ///
    /// Returns [`AuctionError::AuctionClosed`] once the auction is resolved
    /// or past its deadline, and [`AuctionError::BidTooLow`] if `amount`
    /// does not exceed the current highest bid.
    pub fn place_bid(&mut self, bidder: &str, amount: i64, now: Instant) -> Result<(), AuctionError> {
        if !self.is_open_at(now) {
            return Err(AuctionError::AuctionClosed(self.item.clone()));
        }
        if amount <= self.highest_bid {
            return Err(AuctionError::BidTooLow {
                amount,
                current: self.highest_bid,
            });
        }
        self.highest_bid = amount;
        self.highest_bidder = Some(bidder.to_string());
        Ok(())
    }

    /// Transitions `Open -> Resolved` and returns the outcome.
    ///
    /// Returns `None` if the auction was already resolved, so the outcome
    /// is produced exactly once. Only the amount is compared with the
    /// reserve: with no bid the highest bid is 0, so a reserve of 0 or less
    /// is won by [`NO_BIDS_YET`] for 0.
    pub fn resolve(&mut self) -> Option<Outcome> {
        if self.status == AuctionStatus::Resolved {
            return None;
        }
        self.status = AuctionStatus::Resolved;
        if self.highest_bid < self.reserve_price {
            return Some(Outcome::Unsold);
        }
        Some(Outcome::Won {
            bidder: self
                .highest_bidder
                .clone()
                .unwrap_or_else(|| NO_BIDS_YET.to_string()),
            amount: self.highest_bid,
        })
    }
}

/// Point-in-time view of an open auction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionSummary {
    /// Auction identifier.
    pub auction_id: AuctionId,
    /// Item name.
    pub item: String,
    /// Auction format.
    pub auction_type: AuctionType,
    /// Highest bid so far.
    pub highest_bid: i64,
    /// Highest bidder so far.
    pub highest_bidder: Option<String>,
    /// Scheduled end of the countdown.
    pub ends_at: DateTime<Utc>,
}

impl AuctionSummary {
    /// Highest bidder, or [`NO_BIDS_YET`].
    #[must_use]
    pub fn bidder_label(&self) -> &str {
        self.highest_bidder.as_deref().unwrap_or(NO_BIDS_YET)
    }
}

impl From<&Auction> for AuctionSummary {
    fn from(auction: &Auction) -> Self {
        Self {
            auction_id: auction.auction_id,
            item: auction.item.clone(),
            auction_type: auction.auction_type.clone(),
            highest_bid: auction.highest_bid,
            highest_bidder: auction.highest_bidder.clone(),
            ends_at: auction.ends_at,
        }
    }
}
