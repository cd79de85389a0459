//! In-memory caching using moka
//!
//! Holds the transient booking drafts and the generated insight texts. Drafts
//! are dropped after sitting idle; insights expire on a fixed TTL.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::booking::BookingDraft;

/// A draft behind its own lock so it has a single writer
pub type SharedDraft = Arc<Mutex<BookingDraft>>;

/// Application cache holding drafts and insights
#[derive(Clone)]
pub struct AppCache {
    /// Booking drafts (draft id -> draft)
    pub drafts: Cache<Uuid, SharedDraft>,
    /// Insight texts (cache_key -> text)
    pub insights: Cache<String, Arc<String>>,
}

impl AppCache {
    /// Create a new cache instance with the given expiry settings
    pub fn new(draft_idle: Duration, insight_ttl: Duration) -> Self {
        Self {
            // Drafts: live user state, so no size bound; only idle expiry
            // removes them
            drafts: Cache::builder().time_to_idle(draft_idle).build(),

            // Insights: one per location/prompt, rarely change
            insights: Cache::builder()
                .max_capacity(200)
                .time_to_live(insight_ttl)
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            drafts_size: self.drafts.entry_count(),
            insights_size: self.insights.entry_count(),
        }
    }

    /// Drop every cached insight text; drafts are left alone
    pub fn invalidate_insights(&self) {
        self.insights.invalidate_all();
        info!("Insight cache invalidated");
    }

    /// Generate cache key for a local-insight tip
    pub fn insight_key(location: &str) -> String {
        format!("insight:{}", location.to_lowercase())
    }

    /// Generate cache key for a trip plan
    pub fn plan_key(location: &str, passengers: u32) -> String {
        format!("plan:{}:{}", location.to_lowercase(), passengers)
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(30 * 60), Duration::from_secs(60 * 60))
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub drafts_size: u64,
    pub insights_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_case_insensitive() {
        assert_eq!(AppCache::insight_key("Goa"), AppCache::insight_key("GOA"));
        assert_eq!(AppCache::plan_key("Goa", 4), "plan:goa:4");
        assert_ne!(AppCache::plan_key("Goa", 4), AppCache::plan_key("Goa", 6));
    }

    #[tokio::test]
    async fn test_invalidate_insights_keeps_drafts() {
        let cache = AppCache::default();
        cache
            .insights
            .insert(AppCache::insight_key("Goa"), Arc::new("tip".to_string()))
            .await;
        let catalog = crate::catalog::Catalog::seeded();
        let draft = BookingDraft::new(Uuid::new_v4(), catalog.boat("1").unwrap(), chrono::Utc::now());
        cache
            .drafts
            .insert(draft.id, Arc::new(Mutex::new(draft.clone())))
            .await;

        cache.invalidate_insights();
        assert!(cache.insights.get(&AppCache::insight_key("Goa")).await.is_none());
        assert!(cache.drafts.get(&draft.id).await.is_some());
    }
}
