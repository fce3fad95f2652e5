//! Service layer: business logic orchestration.
//!
//! [`AuctionService`] coordinates auction operations, schedules each
//! auction's countdown, and fans events out through the
//! [`super::domain::SessionRegistry`].

pub mod auction_service;

pub use auction_service::AuctionService;
