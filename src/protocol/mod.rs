//! Line protocol: client command parsing and fixed server lines.
//!
//! The wire format is newline-delimited UTF-8. Broadcast notifications are
//! rendered by [`crate::domain::AuctionEvent`]; everything else a client
//! can receive or send is defined here.

pub mod command;
pub mod lines;

pub use command::{Command, parse_command};
