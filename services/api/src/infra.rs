use marquee::workflows::events::submission::{
    EventId, EventIntake, EventRepository, ListingStatus, NotifyError, PromotionNotice,
    RepositoryError, StoredEvent, SubmissionNotifier,
};
use marquee::workflows::events::TierCatalog;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryEventRepository {
    events: Arc<Mutex<HashMap<EventId, StoredEvent>>>,
}

impl EventRepository for InMemoryEventRepository {
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
        if guard.contains_key(&event.event_id) {
            guard.insert(event.event_id.clone(), event);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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
pub(crate) struct LoggingNotifier {
    notices: Arc<Mutex<Vec<PromotionNotice>>>,
}

impl SubmissionNotifier for LoggingNotifier {
    fn publish(&self, notice: PromotionNotice) -> Result<(), NotifyError> {
        tracing::info!(
            event_id = %notice.event_id,
            tier = %notice.tier,
            price = notice.price_amount,
            "promotion notice published"
        );
        let mut guard = self.notices.lock().expect("notifier mutex poisoned");
        guard.push(notice);
        Ok(())
    }
}

impl LoggingNotifier {
    pub(crate) fn notices(&self) -> Vec<PromotionNotice> {
        self.notices.lock().expect("notifier mutex poisoned").clone()
    }
}

pub(crate) fn default_intake(default_currency: &str) -> EventIntake {
    EventIntake::new(TierCatalog::standard(), default_currency)
}
