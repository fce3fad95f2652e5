//! # silent-auction
//!
//! Multi-client silent auction server speaking a newline-delimited text
//! protocol over TCP.
//!
//! Sellers create timed auctions, buyers place bids, and every state change
//! is broadcast to all connected clients. Each auction resolves on its own
//! countdown, independent of any connection.
//!
//! ## Architecture
//!
//! ```text
//! Clients (TCP lines)            Operators (HTTP, optional)
//!     │                              │
//!     ├── Listener (server/)         ├── Status router (status/)
//!     ├── Connection handler         │
//!     │                              │
//!     └──────── AuctionService (service/) ────────┘
//!                   │
//!     ├── AuctionRegistry (domain/) ── per-auction countdown tasks
//!     └── SessionRegistry (domain/) ── broadcast to every session
//! ```

pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod protocol;
pub mod server;
pub mod service;
pub mod status;
