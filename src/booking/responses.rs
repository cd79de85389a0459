//! Response DTOs for booking API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::PriceBreakdownResponse;
use super::flow::{can_advance, BookingStep};
use super::models::{BookingDraft, PricingConfig, TIME_SLOTS};

/// Money value for JSON responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

/// Draft together with everything a client needs to render the current step
#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub draft: BookingDraft,
    pub totals: PriceBreakdownResponse,
    /// Whether an `advance` action will be accepted
    pub can_advance: bool,
    /// Whether the draft can be sent to `POST /drafts/:id/submit`
    pub can_submit: bool,
    /// Step an `advance` moves to; payment continues through submit instead
    pub next_step: Option<BookingStep>,
    pub time_slots: &'static [&'static str],
    pub add_on_cost: MoneyResponse,
}

impl DraftResponse {
    pub fn new(draft: BookingDraft, pricing: &PricingConfig) -> Self {
        let at_payment = draft.step == BookingStep::Payment;
        Self {
            totals: draft.totals(pricing).to_money(&pricing.currency),
            can_advance: !at_payment && can_advance(draft.step, &draft),
            can_submit: at_payment,
            next_step: draft.step.next().filter(|_| !at_payment),
            time_slots: &TIME_SLOTS,
            add_on_cost: MoneyResponse {
                amount: pricing.add_on_cost,
                currency: pricing.currency.clone(),
            },
            draft,
        }
    }
}

/// Response for a stateless quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub duration_hours: u32,
    pub include_add_on: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_rate: Decimal,
    pub totals: PriceBreakdownResponse,
}

/// QR ticket for a booking
#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub booking_id: String,
    pub payload: String,
    /// `data:image/png;base64,...`
    pub qr_code: String,
}

/// Generic error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
