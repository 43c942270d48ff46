//! In-memory caching using moka
//!
//! Route notes are read on every pricing query but change rarely, so a short
//! TTL plus invalidate-on-insert keeps them fresh without a database round
//! trip per quote.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use tracing::info;

use crate::tariff::models::OperationalNote;

/// Application cache holding recent route notes
#[derive(Clone)]
pub struct AppCache {
    /// Route notes (route key -> most recent notes, newest first)
    pub notes: Cache<String, Arc<Vec<OperationalNote>>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Route notes: 500 routes, 5 min TTL, 2 min idle
            notes: Cache::builder()
                .max_capacity(500)
                .time_to_live(Duration::from_secs(5 * 60))
                .time_to_idle(Duration::from_secs(2 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            notes_size: self.notes.entry_count(),
        }
    }

    /// Generate cache key for a route pair
    pub fn route_key(origin: &str, destination: &str) -> String {
        format!("notes:{}:{}", origin, destination)
    }

    /// Invalidate cached notes for one route, called after a note insert
    pub async fn invalidate_route(&self, origin: &str, destination: &str) {
        self.notes
            .invalidate(&Self::route_key(origin, destination))
            .await;
        info!("Cache invalidated for route: {} -> {}", origin, destination);
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub notes_size: u64,
}
