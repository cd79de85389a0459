//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::booking::responses::ErrorResponse;
use crate::booking::{DraftError, FlowError, SubmissionError};
use crate::ticket::TicketError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Booking(#[from] SubmissionError),

    #[error(transparent)]
    Ticket(#[from] TicketError),

    #[error("Invalid request: {0}")]
    Validation(String),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, Option<serde_json::Value>) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", None),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error", None),
            AppError::Draft(e) => match e {
                DraftError::NotFound(_) | DraftError::BoatNotFound(_) => {
                    (StatusCode::NOT_FOUND, "not_found", None)
                }
                DraftError::StaleRevision { expected, current } => (
                    StatusCode::CONFLICT,
                    "stale_revision",
                    Some(json!({ "expected": expected, "current": current })),
                ),
                DraftError::Flow(flow) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    flow_error_type(flow),
                    None,
                ),
                DraftError::Submission { draft, .. } => (
                    StatusCode::BAD_GATEWAY,
                    "submission_failed",
                    Some(json!({ "retryable": true, "draft": draft })),
                ),
            },
            AppError::Booking(e) => match e {
                SubmissionError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", None),
                SubmissionError::AlreadyCancelled(_) | SubmissionError::DuplicateId(_) => {
                    (StatusCode::CONFLICT, "conflict", None)
                }
                SubmissionError::Unavailable(_) => {
                    (StatusCode::BAD_GATEWAY, "booking_store_unavailable", None)
                }
            },
            AppError::Ticket(e) => match e {
                TicketError::Cancelled(_) => (StatusCode::CONFLICT, "booking_cancelled", None),
                TicketError::Encode(_) | TicketError::Image(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
                }
            },
        }
    }
}

fn flow_error_type(err: &FlowError) -> &'static str {
    match err {
        FlowError::NotReady(_) => "step_not_ready",
        FlowError::AtFirstStep => "at_first_step",
        FlowError::SubmitViaEndpoint => "submit_required",
        FlowError::SubmissionInFlight => "submission_in_flight",
        FlowError::UnknownTimeSlot(_) => "unknown_time_slot",
        FlowError::AddOnUnavailable => "add_on_unavailable",
        FlowError::WrongStep { .. } => "wrong_step",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, details) = self.parts();

        let message = if status.is_server_error() {
            tracing::error!("{}: {}", error_type, self);
            match status {
                StatusCode::BAD_GATEWAY => self.to_string(),
                _ => "Internal error".to_string(),
            }
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error_type: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingStep;
    use qrcode::types::QrError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::NotFound("boat 9".into()), StatusCode::NOT_FOUND),
            (
                AppError::Draft(DraftError::Flow(FlowError::NotReady(BookingStep::Details))),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::Draft(DraftError::StaleRevision { expected: 1, current: 2 }),
                StatusCode::CONFLICT,
            ),
            (
                AppError::Booking(SubmissionError::AlreadyCancelled("x".into())),
                StatusCode::CONFLICT,
            ),
            (
                AppError::Ticket(TicketError::Cancelled("x".into())),
                StatusCode::CONFLICT,
            ),
            (
                AppError::Ticket(TicketError::Encode(QrError::DataTooLong)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_encode_failure_is_internal() {
        let err = AppError::Ticket(TicketError::Encode(QrError::DataTooLong));
        let (status, error_type, _) = err.parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_type, "internal_error");
    }
}
