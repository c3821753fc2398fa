//! The submission workflow: raw organizer forms go through intake, land in
//! a repository as stored events, and paid tiers emit promotion notices.

pub mod domain;
pub(crate) mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    EventConfirmationView, EventDetails, EventId, EventRecord, EventSubmission, ListingStatus,
    StoredEvent,
};
pub use intake::{EventIntake, SubmissionError, DEFAULT_CURRENCY};
pub use repository::{
    EventRepository, NotifyError, PromotionNotice, RepositoryError, SubmissionNotifier,
};
pub use router::event_router;
pub use service::{EventServiceError, EventSubmissionService};
