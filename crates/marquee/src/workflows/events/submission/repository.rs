use super::domain::{EventId, StoredEvent};
use crate::workflows::events::{BillingPeriod, TierId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("event already exists")]
    Conflict,
    #[error("event not found")]
    NotFound,
    #[error("event store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence seam for stored events.
pub trait EventRepository: Send + Sync {
    fn insert(&self, event: StoredEvent) -> Result<StoredEvent, RepositoryError>;
    fn update(&self, event: StoredEvent) -> Result<(), RepositoryError>;
    fn fetch(&self, event_id: &EventId) -> Result<Option<StoredEvent>, RepositoryError>;
    fn submitted(&self) -> Result<Vec<StoredEvent>, RepositoryError>;
}

/// Emitted when a paid-tier listing lands, so billing can pick it up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionNotice {
    pub event_id: EventId,
    pub tier: TierId,
    pub price_amount: f64,
    pub billing_period: BillingPeriod,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("notice transport unavailable: {0}")]
    Transport(String),
}

/// Outbound seam for promotion notices.
pub trait SubmissionNotifier: Send + Sync {
    fn publish(&self, notice: PromotionNotice) -> Result<(), NotifyError>;
}
