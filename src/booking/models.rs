//! Booking domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calculators::{compute_totals, PriceBreakdown};
use super::flow::BookingStep;
use crate::catalog::Boat;

/// Duration a new draft starts with
pub const DEFAULT_DURATION_HOURS: u32 = 2;

/// Departure slots offered for every boat
pub const TIME_SLOTS: [&str; 5] = ["09:00 AM", "11:00 AM", "02:00 PM", "04:00 PM", "05:30 PM"];

/// Pricing constants supplied by configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    /// Fraction in `[0, 1]`, e.g. 0.18
    pub tax_rate: Decimal,
    /// Flat cost of the Sea-to-Plate add-on
    pub add_on_cost: Decimal,
    pub currency: String,
}

/// In-progress booking owned by one booking flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingDraft {
    pub id: Uuid,
    pub boat_id: String,
    pub boat_name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_hour: Decimal,
    pub duration_hours: u32,
    pub date: String,
    pub time_slot: String,
    pub include_add_on: bool,
    pub add_on_available: bool,
    pub step: BookingStep,
    /// Bumped on every accepted change
    pub revision: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookingDraft {
    /// Start a draft for `boat` at the details step
    pub fn new(id: Uuid, boat: &Boat, now: DateTime<Utc>) -> Self {
        Self {
            id,
            boat_id: boat.id.clone(),
            boat_name: boat.name.clone(),
            price_per_hour: boat.price_per_hour,
            duration_hours: DEFAULT_DURATION_HOURS,
            date: String::new(),
            time_slot: String::new(),
            include_add_on: false,
            add_on_available: boat.sea_to_plate_available,
            step: BookingStep::Details,
            revision: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Current price, always derived from the draft fields
    pub fn totals(&self, pricing: &PricingConfig) -> PriceBreakdown {
        compute_totals(
            self.price_per_hour,
            self.duration_hours,
            self.include_add_on,
            pricing.add_on_cost,
            pricing.tax_rate,
        )
    }
}

/// Lifecycle status of a persisted booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// A booking handed to (and returned by) the booking store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Booking {
    pub id: String,
    pub boat_id: String,
    pub boat_name: String,
    pub date: String,
    pub time_slot: String,
    pub duration_hours: u32,
    pub include_add_on: bool,
    pub totals: PriceBreakdown,
    /// Same as `totals.grand_total`
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    pub currency: String,
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
