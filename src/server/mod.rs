//! TCP layer: listener and per-connection handler.
//!
//! The listener accepts connections on the auction port and spawns one
//! [`connection::run_connection`] task per client.

pub mod connection;
pub mod listener;

pub use listener::Listener;

/// Upper bound on a single input line, in bytes.
pub const MAX_LINE_LENGTH: usize = 8 * 1024;
