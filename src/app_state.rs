//! Shared application state injected into the status HTTP handlers.

use crate::service::AuctionService;

/// Shared state available to every status handler via Axum's `State`
/// extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Auction service; read-only from HTTP.
    pub auction_service: AuctionService,
}
