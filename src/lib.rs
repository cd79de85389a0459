//! Driftly booking engine and API.
//!
//! Serves the boat catalog, the multi-step booking flow, bookings and the
//! owner dashboard over HTTP/JSON.

pub mod booking;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod insights;
pub mod routes;
pub mod ticket;

use std::sync::Arc;

use axum::{http::Method, routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use booking::{BookingSubmitter, DraftStore, InMemoryBookings};
use cache::AppCache;
use catalog::Catalog;
use config::Config;
use insights::{InsightProvider, InsightService, NoProvider};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<Catalog>,
    pub cache: AppCache,
    pub drafts: DraftStore,
    pub bookings: Arc<InMemoryBookings>,
    /// Where submitted drafts go; the in-memory store unless replaced
    pub submitter: Arc<dyn BookingSubmitter>,
    pub insights: InsightService,
}

impl AppState {
    /// Wire the in-memory services for `config`
    pub fn new(config: Config) -> Self {
        let cache = AppCache::new(config.draft_idle, config.insight_ttl);
        let bookings = Arc::new(InMemoryBookings::with_delay(config.submit_delay));
        let insights = InsightService::new(Arc::new(NoProvider), cache.clone(), config.insight_timeout);

        Self {
            catalog: Arc::new(Catalog::seeded()),
            drafts: DraftStore::new(cache.clone()),
            submitter: bookings.clone(),
            bookings,
            cache,
            insights,
            config: Arc::new(config),
        }
    }

    /// Route submissions to another booking store
    pub fn with_submitter(mut self, submitter: Arc<dyn BookingSubmitter>) -> Self {
        self.submitter = submitter;
        self
    }

    /// Use another generative-text backend for insights
    pub fn with_insight_provider(mut self, provider: Arc<dyn InsightProvider>) -> Self {
        self.insights =
            InsightService::new(provider, self.cache.clone(), self.config.insight_timeout);
        self
    }
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let api = Router::new()
        .merge(routes::router())
        .merge(booking::router());

    Router::new()
        .route("/health", get(routes::health))
        .nest("/api/v1", api)
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
