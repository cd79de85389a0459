//! Catalog route handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::catalog::{Boat, BoatQuery, Location};
use crate::error::{AppError, Result};
use crate::AppState;

pub async fn locations(State(state): State<AppState>) -> Json<Vec<Location>> {
    Json(state.catalog.locations().to_vec())
}

/// Boat listing, optionally filtered by location and search text
pub async fn boats(
    State(state): State<AppState>,
    Query(query): Query<BoatQuery>,
) -> Json<Vec<Boat>> {
    let boats = state.catalog.boats(&query);
    tracing::debug!(
        location = ?query.location,
        query = ?query.query,
        results = boats.len(),
        "Boat search"
    );
    Json(boats)
}

pub async fn boat(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Boat>> {
    state
        .catalog
        .boat(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("boat {}", id)))
}
