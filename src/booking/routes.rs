//! HTTP routes for drafts, quotes and bookings.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::ticket::render_ticket;
use crate::AppState;

use super::calculators::compute_totals;
use super::models::Booking;
use super::requests::{CreateDraftRequest, DraftActionRequest, QuoteRequest};
use super::responses::{DraftResponse, QuoteResponse, TicketResponse};

/// Booking routes, mounted under `/api/v1`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/drafts", post(create_draft))
        .route("/drafts/:id", get(get_draft).delete(discard_draft))
        .route("/drafts/:id/actions", post(apply_action))
        .route("/drafts/:id/submit", post(submit_draft))
        .route("/quote", post(quote))
        .route("/bookings", get(list_bookings))
        .route("/bookings/:id", get(get_booking))
        .route("/bookings/:id/cancel", post(cancel_booking))
        .route("/bookings/:id/ticket", get(booking_ticket))
}

async fn create_draft(
    State(state): State<AppState>,
    Json(req): Json<CreateDraftRequest>,
) -> Result<(StatusCode, Json<DraftResponse>)> {
    let draft = state.drafts.create(&state.catalog, &req.boat_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(DraftResponse::new(draft, &state.config.pricing)),
    ))
}

async fn get_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DraftResponse>> {
    let draft = state.drafts.get(id).await?;
    Ok(Json(DraftResponse::new(draft, &state.config.pricing)))
}

async fn apply_action(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<DraftActionRequest>,
) -> Result<Json<DraftResponse>> {
    let draft = state
        .drafts
        .apply(id, req.action, req.expected_revision)
        .await?;
    Ok(Json(DraftResponse::new(draft, &state.config.pricing)))
}

async fn discard_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.drafts.discard(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn submit_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<Booking>)> {
    let booking = state
        .drafts
        .submit(
            id,
            &state.catalog,
            state.submitter.as_ref(),
            &state.config.pricing,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

async fn quote(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    let boat = state
        .catalog
        .boat(&req.boat_id)
        .ok_or_else(|| AppError::NotFound(format!("boat {}", req.boat_id)))?;

    if req.duration_hours == 0 {
        return Err(AppError::Validation(
            "duration_hours must be at least 1".to_string(),
        ));
    }
    if req.include_add_on && !boat.sea_to_plate_available {
        return Err(AppError::Validation(format!(
            "{} does not offer the Sea-to-Plate add-on",
            boat.name
        )));
    }

    let pricing = &state.config.pricing;
    let totals = compute_totals(
        boat.price_per_hour,
        req.duration_hours,
        req.include_add_on,
        pricing.add_on_cost,
        pricing.tax_rate,
    );

    Ok(Json(QuoteResponse {
        duration_hours: req.duration_hours,
        include_add_on: req.include_add_on,
        tax_rate: pricing.tax_rate,
        totals: totals.to_money(&pricing.currency),
    }))
}

async fn list_bookings(State(state): State<AppState>) -> Json<Vec<Booking>> {
    Json(state.bookings.list().await)
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Booking>> {
    state
        .bookings
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("booking {}", id)))
}

async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Booking>> {
    Ok(Json(state.bookings.cancel(&id).await?))
}

async fn booking_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TicketResponse>> {
    let booking = state
        .bookings
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("booking {}", id)))?;

    let ticket = render_ticket(&booking)?;
    Ok(Json(TicketResponse {
        booking_id: booking.id,
        qr_code: ticket.data_uri(),
        payload: ticket.payload,
    }))
}
