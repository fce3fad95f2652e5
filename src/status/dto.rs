//! Data Transfer Objects for status responses.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{AuctionSummary, SessionCounts};

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process serves requests.
    pub status: String,
    /// RFC 3339 timestamp of the response.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
}

/// One open auction.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuctionDto {
    /// Auction identifier (UUID).
    pub auction_id: String,
    /// Item name.
    pub item: String,
    /// Type label as announced to clients.
    pub auction_type: String,
    /// `"standard"`, `"sealed_bid"` or `"other"`.
    pub auction_kind: String,
    /// Highest bid so far (0 before any bid).
    pub highest_bid: i64,
    /// Highest bidder, absent before any bid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest_bidder: Option<String>,
    /// Scheduled end of the countdown.
    pub ends_at: DateTime<Utc>,
}

impl From<AuctionSummary> for AuctionDto {
    fn from(summary: AuctionSummary) -> Self {
        Self {
            auction_id: summary.auction_id.to_string(),
            item: summary.item,
            auction_kind: summary.auction_type.kind().to_string(),
            auction_type: summary.auction_type.to_string(),
            highest_bid: summary.highest_bid,
            highest_bidder: summary.highest_bidder,
            ends_at: summary.ends_at,
        }
    }
}

/// Open auctions, sorted by item name.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuctionListResponse {
    /// Open auctions.
    pub auctions: Vec<AuctionDto>,
    /// Number of open auctions.
    pub total: usize,
}

/// Connected-session counts.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionCountsResponse {
    /// All registered sessions.
    pub sessions: usize,
    /// Seller sessions.
    pub sellers: usize,
    /// Buyer sessions.
    pub buyers: usize,
}

impl From<SessionCounts> for SessionCountsResponse {
    fn from(counts: SessionCounts) -> Self {
        Self {
            sessions: counts.total(),
            sellers: counts.sellers,
            buyers: counts.buyers,
        }
    }
}
