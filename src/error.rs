//! Auction server error types with wire reply mapping.
//!
//! [`AuctionError`] is the central error type for the server. Validation
//! and business-rule variants map to the exact line sent back to the
//! offending connection; transport variants terminate that connection only.

use tokio_util::codec::LinesCodecError;

/// Server-side error enum.
///
/// # Categories
///
/// | Category       | Variants                                              | Effect                      |
/// |----------------|-------------------------------------------------------|-----------------------------|
/// | Malformed input| `InvalidReservePrice`, `InvalidBidAmount`             | local reply                 |
/// | Business rule  | `BidTooLow`, `AuctionClosed`, `AuctionNotFound`       | local reply                 |
/// | No-op          | `AlreadyExists`                                       | silently ignored            |
/// | Transport      | `Io`, `Codec`                                         | connection worker stops     |
#[derive(Debug, thiserror::Error)]
pub enum AuctionError {
    /// An auction for this item is already registered.
    #[error("auction already exists: {0}")]
    AlreadyExists(String),

    /// No auction is registered under this item name.
    #[error("auction not found: {0}")]
    AuctionNotFound(String),

    /// Bid does not strictly exceed the current highest bid.
    #[error("bid {amount} does not exceed current highest bid {current}")]
    BidTooLow {
        /// Rejected bid amount.
        amount: i64,
        /// Highest bid at the time of rejection.
        current: i64,
    },

    /// The auction is past its deadline or already resolved.
    #[error("auction closed: {0}")]
    AuctionClosed(String),

    /// Reserve price field is not an integer.
    #[error("invalid reserve price: {0}")]
    InvalidReservePrice(String),

    /// Bid amount field is not an integer.
    #[error("invalid bid amount: {0}")]
    InvalidBidAmount(String),

    /// Socket-level failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Line framing failure (over-long line or underlying I/O).
    #[error("codec error: {0}")]
    Codec(#[from] LinesCodecError),
}

impl AuctionError {
    /// Returns the line sent only to the originating connection, if any.
    ///
    /// `None` means the error is either silent (`AlreadyExists`) or fatal
    /// to the connection (`Io`, `Codec`).
    #[must_use]
    pub const fn reply_line(&self) -> Option<&'static str> {
        match self {
            Self::InvalidReservePrice(_) => Some("Invalid reserve price."),
            Self::InvalidBidAmount(_) => Some("Invalid bid amount."),
            Self::BidTooLow { .. } => {
                Some("Your bid must be higher than the current highest bid.")
            }
            Self::AuctionClosed(_) => Some("This auction has ended. No further bids are allowed."),
            Self::AuctionNotFound(_) => Some("No such auction exists."),
            Self::AlreadyExists(_) | Self::Io(_) | Self::Codec(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_errors_have_replies() {
        let err = AuctionError::BidTooLow {
            amount: 300,
            current: 400,
        };
        assert_eq!(
            err.reply_line(),
            Some("Your bid must be higher than the current highest bid.")
        );
        assert_eq!(
            AuctionError::AuctionNotFound("Lamp".to_string()).reply_line(),
            Some("No such auction exists.")
        );
    }

    #[test]
    fn already_exists_is_silent() {
        let err = AuctionError::AlreadyExists("Laptop".to_string());
        assert!(err.reply_line().is_none());
    }

    #[test]
    fn transport_errors_have_no_reply() {
        let err = AuctionError::from(std::io::Error::other("reset"));
        assert!(matches!(err, AuctionError::Io(_)));
        assert!(err.reply_line().is_none());
    }
}
