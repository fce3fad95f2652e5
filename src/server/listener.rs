//! TCP accept loop.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::Instrument;

use super::connection::run_connection;
use crate::error::AuctionError;
use crate::service::AuctionService;

/// Accepts auction-protocol connections and spawns one task per client.
#[derive(Debug)]
pub struct Listener {
    listener: TcpListener,
    service: AuctionService,
}

impl Listener {
    /// Binds the listening socket.
    ///
    /// # Errors
    ///
    /// Returns [`AuctionError::Io`] if the address cannot be bound.
    pub async fn bind(addr: SocketAddr, service: AuctionService) -> Result<Self, AuctionError> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener, service })
    }

    /// Returns the bound address (useful when binding port `0`).
    ///
    /// # Errors
    ///
    /// Returns [`AuctionError::Io`] if the socket address cannot be read.
    pub fn local_addr(&self) -> Result<SocketAddr, AuctionError> {
        Ok(self.listener.local_addr()?)
    }

    /// Runs the accept loop forever.
    ///
    /// A failing connection only ends its own task; an accept failure ends
    /// the loop.
    ///
    /// # Errors
    ///
    /// Returns [`AuctionError::Io`] if accepting a connection fails.
    pub async fn run(self) -> Result<(), AuctionError> {
        loop {
            let (stream, peer) = self.listener.accept().await?;
            if let Err(err) = stream.set_nodelay(true) {
                tracing::debug!(%peer, error = %err, "failed to set TCP_NODELAY");
            }
            tracing::info!(%peer, "connection accepted");

            let service = self.service.clone();
            tokio::spawn(
                async move {
                    match run_connection(stream, service).await {
                        Ok(()) => tracing::info!("connection closed"),
                        Err(err) => tracing::warn!(error = %err, "connection failed"),
                    }
                }
                .instrument(tracing::info_span!("connection", %peer)),
            );
        }
    }
}
