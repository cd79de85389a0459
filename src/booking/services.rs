//! Booking services: record construction and the booking store.
//!
//! The store is an in-memory stand-in for the bookings backend. It owns id
//! acceptance, status assignment and timestamps; the flow only builds the
//! payload it submits.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

use crate::catalog::Boat;

use super::models::{Booking, BookingDraft, BookingStatus, PricingConfig};

/// Booking store errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("booking {0} already exists")]
    DuplicateId(String),

    #[error("booking {0} not found")]
    NotFound(String),

    #[error("booking {0} is already cancelled")]
    AlreadyCancelled(String),

    #[error("booking store unavailable: {0}")]
    Unavailable(String),
}

/// Build the booking record for a draft.
///
/// Pure construction: totals are derived from the draft, identity and name
/// come from `boat`, the id is supplied by the caller. The record is
/// `Pending` until a store accepts it.
pub fn build_booking_record(
    draft: &BookingDraft,
    boat: &Boat,
    id: String,
    pricing: &PricingConfig,
) -> Booking {
    debug_assert_eq!(draft.boat_id, boat.id, "draft belongs to another boat");

    let totals = draft.totals(pricing);
    Booking {
        id,
        boat_id: boat.id.clone(),
        boat_name: boat.name.clone(),
        date: draft.date.clone(),
        time_slot: draft.time_slot.clone(),
        duration_hours: draft.duration_hours,
        include_add_on: draft.include_add_on,
        totals,
        total_price: totals.grand_total,
        currency: pricing.currency.clone(),
        status: BookingStatus::Pending,
        created_at: None,
    }
}

/// Collaborator that persists submitted bookings
#[async_trait]
pub trait BookingSubmitter: Send + Sync {
    /// Persist `booking`, returning the stored record with its status.
    async fn submit(&self, booking: Booking) -> Result<Booking, SubmissionError>;
}

/// Figures shown on the owner dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerStats {
    #[serde(with = "rust_decimal::serde::str")]
    pub earnings: Decimal,
    pub currency: String,
    pub active_bookings: usize,
    pub cancelled_bookings: usize,
    pub fleet_size: usize,
}

/// In-memory booking store, newest booking first
#[derive(Debug, Default)]
pub struct InMemoryBookings {
    bookings: RwLock<Vec<Booking>>,
    delay: Duration,
}

impl InMemoryBookings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that waits `delay` before accepting each submission
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            bookings: RwLock::default(),
            delay,
        }
    }

    pub async fn list(&self) -> Vec<Booking> {
        self.bookings.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Booking> {
        self.bookings
            .read()
            .await
            .iter()
            .find(|b| b.id == id)
            .cloned()
    }

    /// Cancel a pending or confirmed booking
    pub async fn cancel(&self, id: &str) -> Result<Booking, SubmissionError> {
        let mut bookings = self.bookings.write().await;
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| SubmissionError::NotFound(id.to_string()))?;

        if booking.status == BookingStatus::Cancelled {
            return Err(SubmissionError::AlreadyCancelled(id.to_string()));
        }

        booking.status = BookingStatus::Cancelled;
        info!(booking_id = %id, "Booking cancelled");
        Ok(booking.clone())
    }

    /// Dashboard figures over the stored bookings
    pub async fn owner_stats(&self, currency: &str, fleet_size: usize) -> OwnerStats {
        let bookings = self.bookings.read().await;
        let confirmed = bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Confirmed);

        OwnerStats {
            earnings: confirmed.clone().map(|b| b.total_price).sum(),
            currency: currency.to_string(),
            active_bookings: confirmed.count(),
            cancelled_bookings: bookings
                .iter()
                .filter(|b| b.status == BookingStatus::Cancelled)
                .count(),
            fleet_size,
        }
    }
}

#[async_trait]
impl BookingSubmitter for InMemoryBookings {
    async fn submit(&self, mut booking: Booking) -> Result<Booking, SubmissionError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut bookings = self.bookings.write().await;
        if bookings.iter().any(|b| b.id == booking.id) {
            return Err(SubmissionError::DuplicateId(booking.id));
        }

        booking.status = BookingStatus::Confirmed;
        booking.created_at = Some(Utc::now());
        bookings.insert(0, booking.clone());

        info!(
            booking_id = %booking.id,
            boat_id = %booking.boat_id,
            total = %booking.total_price,
            "Booking confirmed"
        );
        Ok(booking)
    }
}
