use super::domain::{EventId, EventSubmission, ListingStatus, StoredEvent};
use super::intake::{EventIntake, SubmissionError};
use super::repository::{
    EventRepository, NotifyError, PromotionNotice, RepositoryError, SubmissionNotifier,
};
use crate::workflows::events::TierCatalog;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

static EVENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_event_id() -> EventId {
    let id = EVENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EventId(format!("evt-{id:06}"))
}

#[derive(Debug, Error)]
pub enum EventServiceError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}

/// Coordinates intake, persistence, and promotion notices.
pub struct EventSubmissionService<R, N> {
    intake: EventIntake,
    repository: Arc<R>,
    notifier: Arc<N>,
}

impl<R, N> EventSubmissionService<R, N>
where
    R: EventRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, intake: EventIntake) -> Self {
        Self {
            intake,
            repository,
            notifier,
        }
    }

    pub fn catalog(&self) -> &TierCatalog {
        self.intake.catalog()
    }

    /// Validate and store a new submission.
    ///
    /// Nothing is persisted and no notice is published unless intake passed
    /// in full.
    pub fn submit(&self, submission: &EventSubmission) -> Result<StoredEvent, EventServiceError> {
        let record = self.intake.record_from_submission(submission)?;
        let stored = self.repository.insert(StoredEvent {
            event_id: next_event_id(),
            status: ListingStatus::Submitted,
            record,
        })?;
        tracing::info!(
            event_id = %stored.event_id,
            tier = %stored.record.media.tier,
            "event submission stored"
        );
        self.notify_paid(&stored)?;
        Ok(stored)
    }

    /// Re-run intake for an existing event and replace its record.
    ///
    /// A resubmitted event returns to the submitted status regardless of
    /// where it was in the listing lifecycle.
    pub fn resubmit(
        &self,
        event_id: &EventId,
        submission: &EventSubmission,
    ) -> Result<StoredEvent, EventServiceError> {
        if self.repository.fetch(event_id)?.is_none() {
            return Err(RepositoryError::NotFound.into());
        }

        let record = self.intake.record_from_submission(submission)?;
        let stored = StoredEvent {
            event_id: event_id.clone(),
            status: ListingStatus::Submitted,
            record,
        };
        self.repository.update(stored.clone())?;
        tracing::info!(event_id = %stored.event_id, "event resubmission stored");
        self.notify_paid(&stored)?;
        Ok(stored)
    }

    pub fn get(&self, event_id: &EventId) -> Result<StoredEvent, EventServiceError> {
        let event = self.repository.fetch(event_id)?;
        event.ok_or_else(|| RepositoryError::NotFound.into())
    }

    /// Events awaiting review, in repository order.
    pub fn pending(&self) -> Result<Vec<StoredEvent>, EventServiceError> {
        Ok(self.repository.submitted()?)
    }

    fn notify_paid(&self, event: &StoredEvent) -> Result<(), EventServiceError> {
        let tier = self.catalog().get(event.record.media.tier);
        if !tier.id.is_paid() {
            return Ok(());
        }
        self.notifier.publish(PromotionNotice {
            event_id: event.event_id.clone(),
            tier: tier.id,
            price_amount: tier.price_amount,
            billing_period: tier.billing_period,
        })?;
        Ok(())
    }
}
