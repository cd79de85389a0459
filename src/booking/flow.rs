//! Booking flow state machine.
//!
//! A draft moves through `Details -> AddOns -> Payment -> Confirming`, one
//! adjacent step at a time. Every change to a draft goes through [`reduce`],
//! which returns the next draft or a [`FlowError`] and never touches its input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::calculators::adjust_duration;
use super::models::{BookingDraft, TIME_SLOTS};

/// Step of the booking flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    Details,
    AddOns,
    Payment,
    /// Submission in flight; terminal for the flow
    Confirming,
}

impl BookingStep {
    pub fn next(self) -> Option<Self> {
        match self {
            BookingStep::Details => Some(BookingStep::AddOns),
            BookingStep::AddOns => Some(BookingStep::Payment),
            BookingStep::Payment => Some(BookingStep::Confirming),
            BookingStep::Confirming => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            BookingStep::Details => None,
            BookingStep::AddOns => Some(BookingStep::Details),
            BookingStep::Payment => Some(BookingStep::AddOns),
            BookingStep::Confirming => Some(BookingStep::Payment),
        }
    }

    pub fn is_terminal(self) -> bool {
        self == BookingStep::Confirming
    }
}

impl std::fmt::Display for BookingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BookingStep::Details => "details",
            BookingStep::AddOns => "add_ons",
            BookingStep::Payment => "payment",
            BookingStep::Confirming => "confirming",
        };
        f.write_str(name)
    }
}

/// Whether the draft may move from `step` to the following step.
///
/// Only the details step has preconditions: a date and a time slot.
pub fn can_advance(step: BookingStep, draft: &BookingDraft) -> bool {
    match step {
        BookingStep::Details => !draft.date.is_empty() && !draft.time_slot.is_empty(),
        BookingStep::AddOns | BookingStep::Payment => true,
        BookingStep::Confirming => false,
    }
}

/// A change requested by the booking flow
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DraftAction {
    SetDate(String),
    SetTimeSlot(String),
    /// Add (or with a negative value, remove) hours
    AdjustDuration(i32),
    SetAddOn(bool),
    Advance,
    Back,
    /// Payment -> Confirming, issued by the submission service
    BeginSubmit,
    /// Confirming -> Payment after the booking store rejected the draft
    SubmitFailed,
}

/// Rejected draft change; the draft is left as it was
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("cannot leave the {0} step until a date and time slot are chosen")]
    NotReady(BookingStep),

    #[error("already at the first step")]
    AtFirstStep,

    #[error("payment is completed by submitting the draft")]
    SubmitViaEndpoint,

    #[error("a submission for this draft is in flight")]
    SubmissionInFlight,

    #[error("{0:?} is not an offered time slot")]
    UnknownTimeSlot(String),

    #[error("this boat does not offer the Sea-to-Plate add-on")]
    AddOnUnavailable,

    #[error("cannot {action} from the {step} step")]
    WrongStep {
        action: &'static str,
        step: BookingStep,
    },
}

/// Apply `action` to `draft`, producing the next draft.
///
/// Accepted actions bump the revision and stamp `updated_at` with `now`.
pub fn reduce(
    draft: &BookingDraft,
    action: DraftAction,
    now: DateTime<Utc>,
) -> Result<BookingDraft, FlowError> {
    if draft.step.is_terminal() && action != DraftAction::SubmitFailed {
        return Err(FlowError::SubmissionInFlight);
    }

    let mut next = draft.clone();

    match action {
        DraftAction::SetDate(date) => next.date = date.trim().to_string(),
        DraftAction::SetTimeSlot(slot) => {
            let slot = slot.trim();
            if !slot.is_empty() && !TIME_SLOTS.contains(&slot) {
                return Err(FlowError::UnknownTimeSlot(slot.to_string()));
            }
            next.time_slot = slot.to_string();
        }
        DraftAction::AdjustDuration(delta) => {
            next.duration_hours = adjust_duration(draft.duration_hours, delta);
        }
        DraftAction::SetAddOn(include) => {
            if include && !draft.add_on_available {
                return Err(FlowError::AddOnUnavailable);
            }
            next.include_add_on = include;
        }
        DraftAction::Advance => {
            if draft.step == BookingStep::Payment {
                return Err(FlowError::SubmitViaEndpoint);
            }
            if !can_advance(draft.step, draft) {
                return Err(FlowError::NotReady(draft.step));
            }
            // Confirming has no successor and was rejected above
            next.step = draft.step.next().unwrap_or(draft.step);
        }
        DraftAction::Back => {
            next.step = draft.step.previous().ok_or(FlowError::AtFirstStep)?;
        }
        DraftAction::BeginSubmit => {
            if draft.step != BookingStep::Payment {
                return Err(FlowError::WrongStep {
                    action: "submit",
                    step: draft.step,
                });
            }
            next.step = BookingStep::Confirming;
        }
        DraftAction::SubmitFailed => {
            if draft.step != BookingStep::Confirming {
                return Err(FlowError::WrongStep {
                    action: "recover a failed submission",
                    step: draft.step,
                });
            }
            next.step = BookingStep::Payment;
        }
    }

    next.revision = draft.revision + 1;
    next.updated_at = now;
    Ok(next)
}
