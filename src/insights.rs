//! Local insight tips and trip plans.
//!
//! Texts come from an [`InsightProvider`] (a generative-text backend). Every
//! call is bounded by a timeout and cached per location; when the provider
//! fails or times out a fixed fallback text is served instead.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::AppCache;
use crate::catalog::ALL_LOCATIONS;

pub const FALLBACK_TIP: &str =
    "Ensure you wear life jackets and carry sun protection. Enjoy your ride!";

pub const FALLBACK_PLAN: &str =
    "A standard 3-hour trip includes coastal sightseeing and a local snack session.";

/// Prompt handed to a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightPrompt {
    pub system: String,
    pub contents: String,
}

impl InsightPrompt {
    /// Three short tips for tourists booking boats at `location`
    pub fn local_insight(location: &str) -> Self {
        Self {
            system: "You are Driftly AI, an expert on Indian coastal tourism. \
                     Be concise, friendly, and practical."
                .to_string(),
            contents: format!(
                "Provide 3 short, specific tips for tourists booking boats in {location}, India. \
                 Focus on: best time for views, a local dish to eat nearby, and a safety tip. \
                 Use Indian English."
            ),
        }
    }

    /// A 3-hour itinerary for a group at `location`
    pub fn trip_plan(location: &str, passengers: u32) -> Self {
        Self {
            system: "You are a professional boat trip planner for Driftly India.".to_string(),
            contents: format!(
                "Plan a 3-hour boat itinerary for {passengers} people in {location}. \
                 Focus on local landmarks and the Sea-to-Plate experience."
            ),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum InsightError {
    #[error("insight provider unavailable: {0}")]
    Unavailable(String),
}

/// Generative-text backend
#[async_trait]
pub trait InsightProvider: Send + Sync {
    async fn generate(&self, prompt: &InsightPrompt) -> Result<String, InsightError>;
}

/// Provider used when no backend is configured; every call falls back
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProvider;

#[async_trait]
impl InsightProvider for NoProvider {
    async fn generate(&self, _prompt: &InsightPrompt) -> Result<String, InsightError> {
        Err(InsightError::Unavailable("no provider configured".to_string()))
    }
}

/// Where an insight text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightSource {
    Provider,
    Cache,
    Fallback,
}

/// An insight text with its origin
#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub location: String,
    /// `None` when browsing all locations
    pub text: Option<String>,
    /// Absent when no text was served
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<InsightSource>,
}

/// Cached, time-bounded access to an [`InsightProvider`]
#[derive(Clone)]
pub struct InsightService {
    provider: Arc<dyn InsightProvider>,
    cache: AppCache,
    timeout: Duration,
}

impl InsightService {
    pub fn new(provider: Arc<dyn InsightProvider>, cache: AppCache, timeout: Duration) -> Self {
        Self {
            provider,
            cache,
            timeout,
        }
    }

    /// Local tips for `location`; nothing for "All Locations".
    pub async fn local_insight(&self, location: &str) -> Insight {
        let location = location.trim();
        if location.is_empty() || location == ALL_LOCATIONS {
            return Insight {
                location: location.to_string(),
                text: None,
                source: None,
            };
        }

        let (text, source) = self
            .fetch(
                AppCache::insight_key(location),
                InsightPrompt::local_insight(location),
                FALLBACK_TIP,
            )
            .await;
        Insight {
            location: location.to_string(),
            text: Some(text),
            source: Some(source),
        }
    }

    /// A trip plan for `passengers` people at `location`.
    pub async fn trip_plan(&self, location: &str, passengers: u32) -> Insight {
        let location = location.trim();
        let (text, source) = self
            .fetch(
                AppCache::plan_key(location, passengers),
                InsightPrompt::trip_plan(location, passengers),
                FALLBACK_PLAN,
            )
            .await;
        Insight {
            location: location.to_string(),
            text: Some(text),
            source: Some(source),
        }
    }

    async fn fetch(
        &self,
        key: String,
        prompt: InsightPrompt,
        fallback: &str,
    ) -> (String, InsightSource) {
        if let Some(cached) = self.cache.insights.get(&key).await {
            debug!("Cache HIT for insight: {}", key);
            return ((*cached).clone(), InsightSource::Cache);
        }
        debug!("Cache MISS for insight: {}", key);

        // Dropping the future on timeout cancels the provider call
        match tokio::time::timeout(self.timeout, self.provider.generate(&prompt)).await {
            Ok(Ok(text)) => {
                self.cache.insights.insert(key, Arc::new(text.clone())).await;
                (text, InsightSource::Provider)
            }
            Ok(Err(e)) => {
                warn!("Insight provider error for {}: {}", key, e);
                (fallback.to_string(), InsightSource::Fallback)
            }
            Err(_) => {
                warn!("Insight provider timed out after {:?} for {}", self.timeout, key);
                (fallback.to_string(), InsightSource::Fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Echoes the prompt and counts calls
    #[derive(Default)]
    struct EchoProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl InsightProvider for EchoProvider {
        async fn generate(&self, prompt: &InsightPrompt) -> Result<String, InsightError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(prompt.contents.clone())
        }
    }

    struct SlowProvider;

    #[async_trait]
    impl InsightProvider for SlowProvider {
        async fn generate(&self, _prompt: &InsightPrompt) -> Result<String, InsightError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("too late".to_string())
        }
    }

    fn service(provider: Arc<dyn InsightProvider>, timeout: Duration) -> InsightService {
        InsightService::new(provider, AppCache::default(), timeout)
    }

    #[test]
    fn test_prompts_mention_location() {
        let prompt = InsightPrompt::local_insight("Goa");
        assert!(prompt.contents.contains("Goa, India"));
        assert!(prompt.system.contains("Driftly AI"));

        let plan = InsightPrompt::trip_plan("Alleppey", 6);
        assert!(plan.contents.contains("6 people in Alleppey"));
    }

    #[tokio::test]
    async fn test_all_locations_has_no_tip() {
        let svc = service(Arc::new(EchoProvider::default()), Duration::from_secs(1));
        let insight = svc.local_insight(ALL_LOCATIONS).await;
        assert!(insight.text.is_none());
        assert!(insight.source.is_none());

        let blank = svc.local_insight("  ").await;
        assert!(blank.source.is_none());
    }

    #[tokio::test]
    async fn test_provider_result_is_cached() {
        let provider = Arc::new(EchoProvider::default());
        let svc = service(provider.clone(), Duration::from_secs(1));

        let first = svc.local_insight("Goa").await;
        assert_eq!(first.source, Some(InsightSource::Provider));
        assert!(first.text.as_deref().unwrap_or_default().contains("Goa"));

        let second = svc.local_insight("Goa").await;
        assert_eq!(second.source, Some(InsightSource::Cache));
        assert_eq!(second.text, first.text);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_provider_falls_back() {
        let svc = service(Arc::new(NoProvider), Duration::from_secs(1));

        let tip = svc.local_insight("Goa").await;
        assert_eq!(tip.text.as_deref(), Some(FALLBACK_TIP));
        assert_eq!(tip.source, Some(InsightSource::Fallback));

        let plan = svc.trip_plan("Goa", 4).await;
        assert_eq!(plan.text.as_deref(), Some(FALLBACK_PLAN));
    }

    #[tokio::test]
    async fn test_timeout_falls_back_and_is_not_cached() {
        let svc = service(Arc::new(SlowProvider), Duration::from_millis(20));

        let tip = svc.local_insight("Goa").await;
        assert_eq!(tip.source, Some(InsightSource::Fallback));
        assert_eq!(tip.text.as_deref(), Some(FALLBACK_TIP));

        let again = svc.local_insight("Goa").await;
        assert_eq!(again.source, Some(InsightSource::Fallback));
    }
}
