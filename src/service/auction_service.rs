//! Auction service: orchestrates auction operations and emits events.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::domain::{
    Auction, AuctionEvent, AuctionId, AuctionRegistry, AuctionSummary, AuctionType, Outcome,
    SessionRegistry,
};
use crate::error::AuctionError;

/// Orchestration layer for all auction operations.
///
/// Owns references to [`AuctionRegistry`] for state and [`SessionRegistry`]
/// for fan-out. Every mutation follows the pattern: acquire the auction
/// lock → mutate → broadcast → release, so each notification describes
/// state already visible to every reader, and notifications for one item
/// leave in the order the mutations happened.
#[derive(Debug, Clone)]
pub struct AuctionService {
    auctions: Arc<AuctionRegistry>,
    sessions: Arc<SessionRegistry>,
    auction_duration: Duration,
}

impl AuctionService {
    /// Creates a new `AuctionService`.
    #[must_use]
    pub fn new(
        auctions: Arc<AuctionRegistry>,
        sessions: Arc<SessionRegistry>,
        auction_duration: Duration,
    ) -> Self {
        Self {
            auctions,
            sessions,
            auction_duration,
        }
    }

    /// Returns a reference to the inner [`AuctionRegistry`].
    #[must_use]
    pub fn auctions(&self) -> &Arc<AuctionRegistry> {
        &self.auctions
    }

    /// Returns a reference to the inner [`SessionRegistry`].
    #[must_use]
    pub fn sessions(&self) -> &Arc<SessionRegistry> {
        &self.sessions
    }

    /// Creates an auction for `item` and schedules its resolution.
    ///
    /// Must be called from within a Tokio runtime: the countdown runs as a
    /// detached task that outlives every connection.
    ///
    /// # Errors
    ///
    /// Returns [`AuctionError::AlreadyExists`] if `item` already has a live
    /// auction. Nothing is broadcast in that case.
    pub async fn create_auction(
        &self,
        item: &str,
        reserve_price: i64,
        auction_type: AuctionType,
    ) -> Result<AuctionId, AuctionError> {
        let auction = Auction::new(
            item.to_string(),
            reserve_price,
            auction_type,
            self.auction_duration,
        );
        let guard = self.auctions.create(auction).await?;
        let auction_id = guard.auction_id;
        let deadline = guard.deadline();

        let _ = self.sessions.broadcast(&AuctionEvent::AuctionStarted {
            auction_id,
            item: item.to_string(),
            auction_type: guard.auction_type.clone(),
        });
        tracing::info!(
            %auction_id,
            item,
            reserve_price,
            auction_type = %guard.auction_type,
            kind = guard.auction_type.kind(),
            "auction created"
        );
        drop(guard);

        let service = self.clone();
        let item_owned = item.to_string();
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = service.resolve_auction(&item_owned, auction_id).await;
        });

        Ok(auction_id)
    }

    /// Places a bid of `amount` by `bidder` on `item`.
    ///
    /// # Errors
    ///
    /// - [`AuctionError::AuctionNotFound`] if `item` has no live auction.
    /// - [`AuctionError::AuctionClosed`] if the auction is resolved or past
    ///   its deadline.
    /// - [`AuctionError::BidTooLow`] if `amount` does not exceed the current
    ///   highest bid.
    pub async fn place_bid(
        &self,
        item: &str,
        bidder: &str,
        amount: i64,
    ) -> Result<(), AuctionError> {
        let entry_lock = self.auctions.get(item).await?;
        let mut auction = entry_lock.write().await;

        auction.place_bid(bidder, amount, Instant::now())?;

        let _ = self.sessions.broadcast(&AuctionEvent::BidAccepted {
            auction_id: auction.auction_id,
            item: item.to_string(),
            bidder: bidder.to_string(),
            amount,
        });
        drop(auction);

        tracing::info!(item, bidder, amount, "bid accepted");
        Ok(())
    }

    /// Resolves the auction `auction_id` registered under `item`, broadcasts
    /// its outcome and removes it from the registry.
    ///
    /// Returns `None` if that auction is no longer registered or was already
    /// resolved, so a given auction yields its outcome exactly once.
    pub async fn resolve_auction(&self, item: &str, auction_id: AuctionId) -> Option<Outcome> {
        let entry_lock = self.auctions.get(item).await.ok()?;
        let mut auction = entry_lock.write().await;
        if auction.auction_id != auction_id {
            return None;
        }
        let outcome = auction.resolve()?;

        let delivered = self.sessions.broadcast(&AuctionEvent::AuctionResolved {
            auction_id,
            item: item.to_string(),
            outcome: outcome.clone(),
        });
        drop(auction);

        let _ = self.auctions.remove(item).await;

        match &outcome {
            Outcome::Won { bidder, amount } => {
                tracing::info!(%auction_id, item, %bidder, amount, delivered, "auction won");
            }
            Outcome::Unsold => {
                tracing::info!(%auction_id, item, delivered, "auction ended unsold");
            }
        }
        Some(outcome)
    }

    /// Returns a snapshot of all open auctions.
    pub async fn list_open_auctions(&self) -> Vec<AuctionSummary> {
        self.auctions.list_open().await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::domain::Role;

    const MINUTE: Duration = Duration::from_secs(60);

    fn make_service() -> AuctionService {
        AuctionService::new(
            Arc::new(AuctionRegistry::new()),
            Arc::new(SessionRegistry::default()),
            MINUTE,
        )
    }

    fn listen(service: &AuctionService) -> mpsc::Receiver<String> {
        let (_, rx) = service.sessions().register("observer", Role::Buyer);
        rx
    }

    fn drain(rx: &mut mpsc::Receiver<String>) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(line) = rx.try_recv() {
            lines.push(line);
        }
        lines
    }

    #[tokio::test(start_paused = true)]
    async fn create_auction_broadcasts_start() {
        let service = make_service();
        let mut rx = listen(&service);

        let result = service
            .create_auction("Laptop", 500, AuctionType::Standard)
            .await;
        assert!(result.is_ok());
        assert_eq!(
            drain(&mut rx),
            vec!["New auction started: Laptop (Type: Standard)".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn duplicate_create_is_silent_noop() {
        let service = make_service();
        let mut rx = listen(&service);

        assert!(service.create_auction("Laptop", 500, AuctionType::Standard).await.is_ok());
        let Err(err) = service
            .create_auction("Laptop", 100, AuctionType::SealedBid)
            .await
        else {
            panic!("duplicate must fail");
        };
        assert!(matches!(err, AuctionError::AlreadyExists(_)));
        assert_eq!(drain(&mut rx).len(), 1);

        let Ok(entry) = service.auctions().get("Laptop").await else {
            panic!("auction missing");
        };
        let auction = entry.read().await;
        assert_eq!(auction.reserve_price, 500);
        assert_eq!(auction.auction_type, AuctionType::Standard);
    }

    #[tokio::test(start_paused = true)]
    async fn accepted_bid_broadcasts_and_rejections_do_not() {
        let service = make_service();
        let mut rx = listen(&service);
        assert!(service.create_auction("Laptop", 500, AuctionType::Standard).await.is_ok());
        let _ = drain(&mut rx);

        assert!(service.place_bid("Laptop", "A", 400).await.is_ok());
        let Err(err) = service.place_bid("Laptop", "B", 300).await else {
            panic!("lower bid accepted");
        };
        assert!(matches!(err, AuctionError::BidTooLow { .. }));

        assert_eq!(
            drain(&mut rx),
            vec!["New highest bid for Laptop: 400 by A".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn bid_on_unknown_item_is_not_found() {
        let service = make_service();
        let Err(err) = service.place_bid("Lamp", "A", 10).await else {
            panic!("bid on unknown item accepted");
        };
        assert!(matches!(err, AuctionError::AuctionNotFound(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn unmet_reserve_resolves_unsold_and_frees_item() {
        let service = make_service();
        let mut rx = listen(&service);
        assert!(service.create_auction("Laptop", 500, AuctionType::Standard).await.is_ok());
        assert!(service.place_bid("Laptop", "A", 400).await.is_ok());
        assert!(service.place_bid("Laptop", "B", 300).await.is_err());

        tokio::time::sleep(MINUTE + Duration::from_secs(1)).await;

        let lines = drain(&mut rx);
        assert_eq!(
            lines.last().map(String::as_str),
            Some("Auction ended! No winning bid, reserve price was not met.")
        );
        assert!(service.auctions().is_empty().await);

        assert!(service.create_auction("Laptop", 100, AuctionType::Standard).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn met_reserve_resolves_with_winner() {
        let service = make_service();
        let mut rx = listen(&service);
        assert!(service.create_auction("Laptop", 500, AuctionType::Standard).await.is_ok());
        assert!(service.place_bid("Laptop", "A", 600).await.is_ok());

        tokio::time::sleep(MINUTE + Duration::from_secs(1)).await;

        assert_eq!(
            drain(&mut rx),
            vec![
                "New auction started: Laptop (Type: Standard)".to_string(),
                "New highest bid for Laptop: 600 by A".to_string(),
                "Auction for item ended! Winner: A for 600".to_string(),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn resolution_fires_once_at_deadline() {
        let service = make_service();
        let mut rx = listen(&service);
        assert!(service.create_auction("Laptop", 0, AuctionType::Standard).await.is_ok());
        let _ = drain(&mut rx);

        tokio::time::sleep(MINUTE - Duration::from_millis(10)).await;
        assert!(drain(&mut rx).is_empty());
        assert!(!service.auctions().is_empty().await);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(
            drain(&mut rx),
            vec!["Auction for item ended! Winner: No bids yet for 0".to_string()]
        );

        tokio::time::sleep(MINUTE * 3).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn unbid_zero_reserve_is_won_by_placeholder() {
        let service = make_service();
        let mut rx = listen(&service);
        assert!(service.create_auction("Pen", 0, AuctionType::Standard).await.is_ok());

        tokio::time::sleep(MINUTE + Duration::from_secs(1)).await;

        assert_eq!(
            drain(&mut rx),
            vec![
                "New auction started: Pen (Type: Standard)".to_string(),
                "Auction for item ended! Winner: No bids yet for 0".to_string(),
            ]
        );
        assert!(service.auctions().is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn negative_reserve_and_unknown_type_are_accepted() {
        let service = make_service();
        let mut rx = listen(&service);
        assert!(
            service
                .create_auction("Laptop", -5, AuctionType::from("Dutch"))
                .await
                .is_ok()
        );
        let Err(err) = service.place_bid("Laptop", "A", -5).await else {
            panic!("negative bid accepted");
        };
        assert!(matches!(err, AuctionError::BidTooLow { amount: -5, current: 0 }));

        tokio::time::sleep(MINUTE + Duration::from_secs(1)).await;

        assert_eq!(
            drain(&mut rx),
            vec![
                "New auction started: Laptop (Type: Dutch)".to_string(),
                "Auction for item ended! Winner: No bids yet for 0".to_string(),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn early_resolution_makes_timer_a_noop() {
        let service = make_service();
        let mut rx = listen(&service);
        let Ok(auction_id) = service
            .create_auction("Laptop", 500, AuctionType::Standard)
            .await
        else {
            panic!("creation failed");
        };

        assert_eq!(
            service.resolve_auction("Laptop", auction_id).await,
            Some(Outcome::Unsold)
        );
        assert!(service.resolve_auction("Laptop", auction_id).await.is_none());

        tokio::time::sleep(MINUTE * 2).await;
        assert_eq!(drain(&mut rx).len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_timer_does_not_resolve_successor() {
        let service = make_service();
        let Ok(first) = service
            .create_auction("Laptop", 500, AuctionType::Standard)
            .await
        else {
            panic!("creation failed");
        };
        assert!(service.auctions().remove("Laptop").await);
        assert!(service.create_auction("Laptop", 500, AuctionType::Standard).await.is_ok());

        assert!(service.resolve_auction("Laptop", first).await.is_none());
        assert_eq!(service.list_open_auctions().await.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_bids_linearize_to_maximum() {
        let service = make_service();
        let mut rx = listen(&service);
        assert!(service.create_auction("Laptop", 0, AuctionType::Standard).await.is_ok());
        let _ = drain(&mut rx);

        let mut handles = Vec::new();
        for amount in 1..=50i64 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .place_bid("Laptop", &format!("bidder-{amount}"), amount)
                    .await
                    .map(|()| amount)
            }));
        }
        let mut accepted = Vec::new();
        for handle in handles {
            let Ok(result) = handle.await else {
                panic!("task panicked");
            };
            if let Ok(amount) = result {
                accepted.push(amount);
            }
        }

        let Ok(entry) = service.auctions().get("Laptop").await else {
            panic!("auction missing");
        };
        assert_eq!(entry.read().await.highest_bid(), 50);
        assert_eq!(accepted.iter().max(), Some(&50));

        // Broadcast order follows linearization order: strictly increasing.
        let broadcast: Vec<i64> = drain(&mut rx)
            .iter()
            .filter_map(|line| line.split(": ").nth(1))
            .filter_map(|rest| rest.split(' ').next())
            .filter_map(|n| n.parse().ok())
            .collect();
        assert_eq!(broadcast.len(), accepted.len());
        assert!(broadcast.windows(2).all(|w| matches!(w, [a, b] if a < b)));
    }
}
