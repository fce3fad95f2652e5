//! silent-auction server entry point.
//!
//! Starts the TCP auction listener and, when configured, the read-only
//! HTTP status server.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use silent_auction::app_state::AppState;
use silent_auction::config::{LogFormat, ServerConfig};
use silent_auction::domain::{AuctionRegistry, SessionRegistry};
use silent_auction::server::Listener;
use silent_auction::service::AuctionService;
use silent_auction::status;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(
        addr = %config.listen_addr,
        auction_secs = config.auction_duration.as_secs(),
        queue_capacity = config.session_queue_capacity,
        "starting silent-auction"
    );

    // Build domain + service layer
    let auctions = Arc::new(AuctionRegistry::new());
    let sessions = Arc::new(SessionRegistry::new(config.session_queue_capacity));
    let auction_service = AuctionService::new(auctions, sessions, config.auction_duration);

    // Optional status server
    if let Some(status_addr) = config.status_addr {
        let listener = tokio::net::TcpListener::bind(status_addr).await?;
        let app = status::build_router(AppState {
            auction_service: auction_service.clone(),
        });
        tracing::info!(addr = %status_addr, "status server listening");
        tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                tracing::error!(error = %err, "status server stopped");
            }
        });
    }

    // Start auction listener; bind or accept failure ends the process.
    let listener = Listener::bind(config.listen_addr, auction_service).await?;
    tracing::info!(addr = %listener.local_addr()?, "auction server listening");
    listener.run().await?;

    Ok(())
}
