//! Steady-state commands sent by sellers and buyers.
//!
//! Seller: `item:reservePrice:auctionType`. Buyer: `item:bidAmount`.
//! Trailing empty fields are dropped before counting (`Laptop:600:` is a
//! bid), then fields are trimmed. A line with the wrong number of fields, or
//! with an empty item, is not a command and is ignored. Amounts are signed
//! integers; the auction type is free-form.

use crate::domain::{AuctionType, Role};
use crate::error::AuctionError;

/// A parsed client command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Seller creates an auction.
    CreateAuction {
        /// Item name.
        item: String,
        /// Minimum winning bid.
        reserve_price: i64,
        /// Auction format.
        auction_type: AuctionType,
    },
    /// Buyer bids on an item.
    PlaceBid {
        /// Item name.
        item: String,
        /// Bid amount.
        amount: i64,
    },
}

/// Parses one input line for a session with the given role.
///
/// Returns `Ok(None)` for lines that are not commands for that role.
///
/// # Errors
///
/// Returns [`AuctionError::InvalidReservePrice`] or
/// [`AuctionError::InvalidBidAmount`] when the line has the right shape but
/// the amount is not an integer.
pub fn parse_command(role: Role, line: &str) -> Result<Option<Command>, AuctionError> {
    let mut fields: Vec<&str> = line.split(':').collect();
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    let fields: Vec<&str> = fields.into_iter().map(str::trim).collect();

    match (role, fields.as_slice()) {
        (Role::Seller, [item, reserve, auction_type]) if !item.is_empty() => {
            let reserve_price = reserve
                .parse::<i64>()
                .map_err(|_| AuctionError::InvalidReservePrice((*reserve).to_string()))?;
            Ok(Some(Command::CreateAuction {
                item: (*item).to_string(),
                reserve_price,
                auction_type: AuctionType::from(*auction_type),
            }))
        }
        (Role::Buyer, [item, amount]) if !item.is_empty() => {
            let amount = amount
                .parse::<i64>()
                .map_err(|_| AuctionError::InvalidBidAmount((*amount).to_string()))?;
            Ok(Some(Command::PlaceBid {
                item: (*item).to_string(),
                amount,
            }))
        }
        _ => Ok(None),
    }
}
