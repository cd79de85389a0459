//! Draft store and booking submission.
//!
//! Drafts live in [`AppCache::drafts`], each behind its own mutex, so a draft
//! has exactly one writer at a time. Every change goes through
//! [`flow::reduce`](super::flow::reduce).

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cache::{AppCache, SharedDraft};
use crate::catalog::Catalog;

use super::flow::{reduce, DraftAction, FlowError};
use super::models::{Booking, BookingDraft, PricingConfig};
use super::services::{build_booking_record, BookingSubmitter, SubmissionError};

/// Draft operation errors
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("draft {0} not found")]
    NotFound(Uuid),

    #[error("boat {0} not found")]
    BoatNotFound(String),

    #[error("draft revision {expected} is stale, current revision is {current}")]
    StaleRevision { expected: u64, current: u64 },

    #[error(transparent)]
    Flow(#[from] FlowError),

    /// The booking store rejected the draft; `draft` is what was kept
    #[error("booking submission failed: {source}")]
    Submission {
        draft: Box<BookingDraft>,
        source: SubmissionError,
    },
}

/// Operations on the drafts held in the cache
#[derive(Clone)]
pub struct DraftStore {
    cache: AppCache,
}

impl DraftStore {
    pub fn new(cache: AppCache) -> Self {
        Self { cache }
    }

    /// Start a draft for the boat with `boat_id`.
    pub async fn create(&self, catalog: &Catalog, boat_id: &str) -> Result<BookingDraft, DraftError> {
        let boat = catalog
            .boat(boat_id)
            .ok_or_else(|| DraftError::BoatNotFound(boat_id.to_string()))?;

        let draft = BookingDraft::new(Uuid::new_v4(), boat, Utc::now());
        self.cache
            .drafts
            .insert(draft.id, Arc::new(Mutex::new(draft.clone())))
            .await;

        info!(draft_id = %draft.id, boat_id = %boat.id, "Draft created");
        Ok(draft)
    }

    async fn shared(&self, id: Uuid) -> Result<SharedDraft, DraftError> {
        self.cache.drafts.get(&id).await.ok_or(DraftError::NotFound(id))
    }

    /// Lock a draft for writing.
    ///
    /// The draft may have been booked or discarded while we waited for the
    /// lock, so the entry is looked up again once it is held.
    async fn lock(&self, id: Uuid) -> Result<OwnedMutexGuard<BookingDraft>, DraftError> {
        let shared = self.shared(id).await?;
        let guard = shared.clone().lock_owned().await;

        match self.cache.drafts.get(&id).await {
            Some(current) if Arc::ptr_eq(&current, &shared) => Ok(guard),
            _ => Err(DraftError::NotFound(id)),
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<BookingDraft, DraftError> {
        let shared = self.shared(id).await?;
        let draft = shared.lock().await.clone();
        Ok(draft)
    }

    /// Apply `action` to a draft.
    ///
    /// With `expected_revision` set, the write only lands if nobody changed
    /// the draft since the caller last read it.
    pub async fn apply(
        &self,
        id: Uuid,
        action: DraftAction,
        expected_revision: Option<u64>,
    ) -> Result<BookingDraft, DraftError> {
        let mut draft = self.lock(id).await?;

        if let Some(expected) = expected_revision {
            if expected != draft.revision {
                debug!(draft_id = %id, expected, current = draft.revision, "Stale draft write");
                return Err(DraftError::StaleRevision {
                    expected,
                    current: draft.revision,
                });
            }
        }

        let next = reduce(&draft, action, Utc::now())?;
        *draft = next.clone();
        Ok(next)
    }

    /// Drop a draft without booking it.
    ///
    /// Waits for any submission in flight; a draft that got booked meanwhile
    /// is reported as not found.
    pub async fn discard(&self, id: Uuid) -> Result<(), DraftError> {
        let _draft = self.lock(id).await?;
        self.cache.drafts.invalidate(&id).await;
        info!(draft_id = %id, "Draft discarded");
        Ok(())
    }

    /// Submit a draft that reached the payment step.
    ///
    /// The booking id is minted here. The store is called exactly once; on
    /// failure the draft goes back to the payment step with its fields intact
    /// and stays available for a manual retry.
    pub async fn submit(
        &self,
        id: Uuid,
        catalog: &Catalog,
        submitter: &dyn BookingSubmitter,
        pricing: &PricingConfig,
    ) -> Result<Booking, DraftError> {
        let mut draft = self.lock(id).await?;

        let boat = catalog
            .boat(&draft.boat_id)
            .ok_or_else(|| DraftError::BoatNotFound(draft.boat_id.clone()))?;

        *draft = reduce(&draft, DraftAction::BeginSubmit, Utc::now())?;

        let record = build_booking_record(&draft, boat, Uuid::new_v4().to_string(), pricing);
        info!(draft_id = %id, booking_id = %record.id, "Submitting booking");

        match submitter.submit(record).await {
            Ok(booking) => {
                self.cache.drafts.invalidate(&id).await;
                Ok(booking)
            }
            Err(source) => {
                warn!(draft_id = %id, error = %source, "Booking submission failed");
                *draft = reduce(&draft, DraftAction::SubmitFailed, Utc::now())?;
                Err(DraftError::Submission {
                    draft: Box::new(draft.clone()),
                    source,
                })
            }
        }
    }
}
