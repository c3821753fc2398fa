use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::workflows::events::submission::domain::{
    EventId, EventSubmission, ListingStatus, StoredEvent,
};
use crate::workflows::events::submission::repository::{
    EventRepository, NotifyError, PromotionNotice, RepositoryError, SubmissionNotifier,
};
use crate::workflows::events::submission::{event_router, EventIntake, EventSubmissionService};
use crate::workflows::events::{ImageSubmission, TierCatalog};

pub(super) fn intake() -> EventIntake {
    EventIntake::new(TierCatalog::standard(), "USD")
}

pub(super) fn submission() -> EventSubmission {
    EventSubmission {
        title: "Harbor Jazz Night".to_string(),
        category: "Music".to_string(),
        description: "An evening of live jazz on the waterfront.".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 6, 12),
        end_date: NaiveDate::from_ymd_opt(2026, 6, 13),
        venue: "Pier 9 Pavilion".to_string(),
        organizer_name: "Harborline Events".to_string(),
        organizer_currency: None,
        capacity: Some(350),
        images: vec![
            ImageSubmission {
                url: "https://cdn.example/jazz/stage.jpg".to_string(),
                caption: Some("Main stage".to_string()),
                order: Some(0),
            },
            ImageSubmission {
                url: "https://cdn.example/jazz/crowd.jpg".to_string(),
                caption: None,
                order: Some(1),
            },
            ImageSubmission {
                url: "https://cdn.example/jazz/pier.jpg".to_string(),
                caption: None,
                order: None,
            },
        ],
        videos: vec![
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            "https://vimeo.com/76979871".to_string(),
        ],
        promotion_tier: Some("boost".to_string()),
        ticketing: json!({
            "general": 25.0,
            "vip": 60.0,
            "earlyBird": {"price": 18.0}
        }),
    }
}

pub(super) fn free_submission() -> EventSubmission {
    let mut submission = submission();
    submission.promotion_tier = None;
    submission.images.truncate(1);
    submission.videos.clear();
    submission.ticketing = Value::Null;
    submission
}

pub(super) fn missing_fields_submission() -> EventSubmission {
    let mut submission = submission();
    submission.title.clear();
    submission.venue = "   ".to_string();
    submission.capacity = Some(0);
    submission
}

pub(super) fn unknown_tier_submission() -> EventSubmission {
    let mut submission = submission();
    submission.promotion_tier = Some("platinum".to_string());
    submission
}

pub(super) fn build_service() -> (
    EventSubmissionService<MemoryRepository, MemoryNotifier>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = EventSubmissionService::new(repository.clone(), notifier.clone(), intake());
    (service, repository, notifier)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) events: Arc<Mutex<HashMap<EventId, StoredEvent>>>,
}

impl EventRepository for MemoryRepository {
    fn insert(&self, event: StoredEvent) -> Result<StoredEvent, RepositoryError> {
        let mut guard = self.events.lock().expect("repository mutex poisoned");
        if guard.contains_key(&event.event_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(event.event_id.clone(), event.clone());
        Ok(event)
    }

    fn update(&self, event: StoredEvent) -> Result<(), RepositoryError> {
        let mut guard = self.events.lock().expect("repository mutex poisoned");
        if !guard.contains_key(&event.event_id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(event.event_id.clone(), event);
        Ok(())
    }

    fn fetch(&self, event_id: &EventId) -> Result<Option<StoredEvent>, RepositoryError> {
        let guard = self.events.lock().expect("repository mutex poisoned");
        Ok(guard.get(event_id).cloned())
    }

    fn submitted(&self) -> Result<Vec<StoredEvent>, RepositoryError> {
        let guard = self.events.lock().expect("repository mutex poisoned");
        let mut pending: Vec<StoredEvent> = guard
            .values()
            .filter(|event| event.status == ListingStatus::Submitted)
            .cloned()
            .collect();
        pending.sort_by(|a, b| a.event_id.0.cmp(&b.event_id.0));
        Ok(pending)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    notices: Arc<Mutex<Vec<PromotionNotice>>>,
}

impl MemoryNotifier {
    pub(super) fn notices(&self) -> Vec<PromotionNotice> {
        self.notices.lock().expect("notifier mutex poisoned").clone()
    }
}

impl SubmissionNotifier for MemoryNotifier {
    fn publish(&self, notice: PromotionNotice) -> Result<(), NotifyError> {
        self.notices
            .lock()
            .expect("notifier mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) struct ConflictRepository;

impl EventRepository for ConflictRepository {
    fn insert(&self, _event: StoredEvent) -> Result<StoredEvent, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _event: StoredEvent) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _event_id: &EventId) -> Result<Option<StoredEvent>, RepositoryError> {
        Ok(None)
    }

    fn submitted(&self) -> Result<Vec<StoredEvent>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl EventRepository for UnavailableRepository {
    fn insert(&self, _event: StoredEvent) -> Result<StoredEvent, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _event: StoredEvent) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _event_id: &EventId) -> Result<Option<StoredEvent>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn submitted(&self) -> Result<Vec<StoredEvent>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct FailingNotifier;

impl SubmissionNotifier for FailingNotifier {
    fn publish(&self, _notice: PromotionNotice) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("billing queue offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 16)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn event_router_with_service(
    service: EventSubmissionService<MemoryRepository, MemoryNotifier>,
) -> axum::Router {
    event_router(Arc::new(service))
}
