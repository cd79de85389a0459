//! Route handlers for the catalog, owner dashboard and insights

pub mod catalog;
pub mod insights;

use axum::{
    extract::State,
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;

use crate::booking::services::OwnerStats;
use crate::cache::CacheStats;
use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub cache: CacheStats,
}

pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        cache: state.cache.stats(),
    })
}

pub async fn owner_stats(State(state): State<AppState>) -> Json<OwnerStats> {
    Json(
        state
            .bookings
            .owner_stats(&state.config.pricing.currency, state.catalog.fleet_size())
            .await,
    )
}

/// Catalog, owner and insight routes, mounted under `/api/v1`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/locations", get(catalog::locations))
        .route("/boats", get(catalog::boats))
        .route("/boats/:id", get(catalog::boat))
        .route("/owner/stats", get(owner_stats))
        .route("/insights", get(insights::local_insight))
        .route("/insights/plan", get(insights::trip_plan))
        .route("/insights/cache", delete(insights::flush_cache))
}
