//! Concurrent auction storage with per-auction locking.
//!
//! [`AuctionRegistry`] maps item names to live auctions. The outer map lock
//! serializes creation and removal; each auction sits behind its own
//! [`tokio::sync::RwLock`], which is the linearization point for bids and
//! resolution on that item.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

use super::auction::{Auction, AuctionSummary};
use crate::error::AuctionError;

/// Central store for all live auctions, keyed by case-sensitive item name.
///
/// # Concurrency
///
/// - Creation of the same item is atomic: exactly one creator wins.
/// - Bids on different items proceed in parallel.
/// - Bids and resolution on the same item are serialized.
#[derive(Debug)]
pub struct AuctionRegistry {
    auctions: RwLock<HashMap<String, Arc<RwLock<Auction>>>>,
}

impl AuctionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            auctions: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts `auction` if its item is not registered yet.
    ///
    /// Returns a write guard on the freshly inserted auction, acquired
    /// before the entry became visible. Other tasks reach the auction only
    /// after the caller drops the guard.
    ///
    /// # Errors
    ///
    /// Returns [`AuctionError::AlreadyExists`] if an auction for the same
    /// item is still registered.
    pub async fn create(
        &self,
        auction: Auction,
    ) -> Result<OwnedRwLockWriteGuard<Auction>, AuctionError> {
        let mut map = self.auctions.write().await;
        if map.contains_key(&auction.item) {
            return Err(AuctionError::AlreadyExists(auction.item));
        }
        let item = auction.item.clone();
        let entry = Arc::new(RwLock::new(auction));
        let guard = Arc::clone(&entry).write_owned().await;
        map.insert(item, entry);
        Ok(guard)
    }

    /// Returns the auction registered for `item` behind its lock.
    ///
    /// # Errors
    ///
    /// Returns [`AuctionError::AuctionNotFound`] if no auction is
    /// registered for `item`.
    pub async fn get(&self, item: &str) -> Result<Arc<RwLock<Auction>>, AuctionError> {
        let map = self.auctions.read().await;
        map.get(item)
            .cloned()
            .ok_or_else(|| AuctionError::AuctionNotFound(item.to_string()))
    }

    /// Removes the auction for `item`. Removing an absent item is a no-op.
    ///
    /// Returns `true` if an entry was removed.
    pub async fn remove(&self, item: &str) -> bool {
        self.auctions.write().await.remove(item).is_some()
    }

    /// Returns a snapshot of all open auctions, sorted by item name.
    ///
    /// Auctions resolved but not yet removed are skipped.
    pub async fn list_open(&self) -> Vec<AuctionSummary> {
        let map = self.auctions.read().await;
        let now = tokio::time::Instant::now();
        let mut summaries = Vec::with_capacity(map.len());
        for entry_lock in map.values() {
            let auction = entry_lock.read().await;
            if auction.is_open_at(now) {
                summaries.push(AuctionSummary::from(&*auction));
            }
        }
        summaries.sort_by(|a, b| a.item.cmp(&b.item));
        summaries
    }

    /// Returns the number of registered auctions.
    pub async fn len(&self) -> usize {
        self.auctions.read().await.len()
    }

    /// Returns `true` if the registry contains no auctions.
    pub async fn is_empty(&self) -> bool {
        self.auctions.read().await.is_empty()
    }
}

impl Default for AuctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
