//! Fixed handshake lines sent by the server.

use crate::domain::{AuctionSummary, Role};

/// First line sent on every connection.
pub const WELCOME: &str = "Welcome to Silent Auction! Please enter your name:";

/// Role question, sent after the name is received.
pub const ROLE_PROMPT: &str = "Are you a seller? (yes/no):";

/// Header of the open-auction snapshot sent to buyers.
pub const AVAILABLE_AUCTIONS: &str = "Available Auctions:";

/// Trailer of the open-auction snapshot sent to buyers.
pub const BID_HINT: &str = "To bid, enter: item:bidAmount";

/// Greeting sent once the role is known.
#[must_use]
pub fn greeting(identity: &str, role: Role) -> String {
    match role {
        Role::Seller => format!("Hello, {identity}! You can create auctions."),
        Role::Buyer => format!("Hello, {identity}! You can bid on items."),
    }
}

/// One snapshot entry: `<item> - Highest bid: <n> by <bidder>`.
#[must_use]
pub fn snapshot_entry(summary: &AuctionSummary) -> String {
    format!(
        "{} - Highest bid: {} by {}",
        summary.item,
        summary.highest_bid,
        summary.bidder_label()
    )
}

/// Full buyer snapshot: header, one entry per open auction, trailer.
#[must_use]
pub fn buyer_snapshot(auctions: &[AuctionSummary]) -> Vec<String> {
    let mut lines = Vec::with_capacity(auctions.len() + 2);
    lines.push(AVAILABLE_AUCTIONS.to_string());
    lines.extend(auctions.iter().map(snapshot_entry));
    lines.push(BID_HINT.to_string());
    lines
}
