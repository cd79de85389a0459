//! Insight route handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::insights::Insight;
use crate::AppState;

/// Query parameters for a local tip
#[derive(Debug, Deserialize)]
pub struct InsightQuery {
    #[serde(default)]
    pub location: String,
}

/// Query parameters for a trip plan
#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    pub location: String,
    #[serde(default = "default_passengers")]
    pub passengers: u32,
}

fn default_passengers() -> u32 {
    2
}

pub async fn local_insight(
    State(state): State<AppState>,
    Query(query): Query<InsightQuery>,
) -> Json<Insight> {
    Json(state.insights.local_insight(&query.location).await)
}

pub async fn trip_plan(
    State(state): State<AppState>,
    Query(query): Query<PlanQuery>,
) -> Result<Json<Insight>> {
    if query.location.trim().is_empty() {
        return Err(AppError::Validation("location is required".to_string()));
    }
    if query.passengers == 0 {
        return Err(AppError::Validation("passengers must be at least 1".to_string()));
    }
    Ok(Json(
        state
            .insights
            .trip_plan(&query.location, query.passengers)
            .await,
    ))
}

/// Forget cached tips and plans so the next request asks the provider again
pub async fn flush_cache(State(state): State<AppState>) -> StatusCode {
    state.cache.invalidate_insights();
    StatusCode::NO_CONTENT
}
