//! Booking engine module.
//!
//! Price computation, the booking flow state machine, draft storage and
//! submission, plus the HTTP routes that expose them.

pub mod calculators;
pub mod drafts;
pub mod flow;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{adjust_duration, compute_totals, round_money, PriceBreakdown};
pub use drafts::{DraftError, DraftStore};
pub use flow::{can_advance, reduce, BookingStep, DraftAction, FlowError};
pub use models::{Booking, BookingDraft, BookingStatus, PricingConfig, TIME_SLOTS};
pub use routes::router;
pub use services::{build_booking_record, BookingSubmitter, InMemoryBookings, SubmissionError};
