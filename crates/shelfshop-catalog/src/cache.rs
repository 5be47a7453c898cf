//! Time-based reuse of catalog results.
//!
//! A result fetched for a given product count may be served again until the
//! revalidation window elapses. Only successful results are stored.

use std::collections::HashMap;
use std::time::Duration;

use shelfshop_core::NormalizedProduct;
use tokio::sync::Mutex;
use tokio::time::Instant;

struct CacheEntry {
    fetched_at: Instant,
    products: Vec<NormalizedProduct>,
}

/// Catalog results keyed by requested count, valid for `ttl`.
pub struct RevalidationCache {
    ttl: Duration,
    entries: Mutex<HashMap<u32, CacheEntry>>,
}

impl RevalidationCache {
    /// A zero `ttl` disables caching entirely.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Returns the cached products for `count` if still inside the window.
    /// Stale entries are evicted.
    pub async fn get(&self, count: u32) -> Option<Vec<NormalizedProduct>> {
        if !self.is_enabled() {
            return None;
        }
        let mut entries = self.entries.lock().await;
        match entries.get(&count) {
            Some(entry) if entry.fetched_at.elapsed() < self.ttl => Some(entry.products.clone()),
            Some(_) => {
                entries.remove(&count);
                None
            }
            None => None,
        }
    }

    pub async fn insert(&self, count: u32, products: Vec<NormalizedProduct>) {
        if !self.is_enabled() {
            return;
        }
        self.entries.lock().await.insert(
            count,
            CacheEntry {
                fetched_at: Instant::now(),
                products,
            },
        );
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}
