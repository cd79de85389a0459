//! Request DTOs for booking API endpoints.

use serde::Deserialize;

use super::flow::DraftAction;

/// Request to start a booking draft
#[derive(Debug, Deserialize)]
pub struct CreateDraftRequest {
    pub boat_id: String,
}

/// Request to apply one action to a draft
#[derive(Debug, Deserialize)]
pub struct DraftActionRequest {
    pub action: DraftAction,
    /// Revision the client last saw; stale writes are rejected
    #[serde(default)]
    pub expected_revision: Option<u64>,
}

/// Request to price a boat without starting a draft
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub boat_id: String,
    #[serde(default = "default_duration")]
    pub duration_hours: u32,
    #[serde(default)]
    pub include_add_on: bool,
}

fn default_duration() -> u32 {
    super::models::DEFAULT_DURATION_HOURS
}
