use super::domain::{EventId, EventSubmission};
use super::intake::SubmissionError;
use super::repository::{EventRepository, RepositoryError, SubmissionNotifier};
use super::service::{EventServiceError, EventSubmissionService};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;

/// HTTP surface for the submission workflow.
pub fn event_router<R, N>(service: Arc<EventSubmissionService<R, N>>) -> Router
where
    R: EventRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    Router::new()
        .route("/api/v1/events", post(submit_handler::<R, N>))
        .route(
            "/api/v1/events/:event_id",
            get(status_handler::<R, N>).put(resubmit_handler::<R, N>),
        )
        .route("/api/v1/promotion/tiers", get(tiers_handler::<R, N>))
        .with_state(service)
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<EventSubmissionService<R, N>>>,
    Json(submission): Json<EventSubmission>,
) -> Response
where
    R: EventRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    match service.submit(&submission) {
        Ok(stored) => (StatusCode::CREATED, Json(stored.confirmation_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn resubmit_handler<R, N>(
    State(service): State<Arc<EventSubmissionService<R, N>>>,
    Path(event_id): Path<String>,
    Json(submission): Json<EventSubmission>,
) -> Response
where
    R: EventRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    match service.resubmit(&EventId(event_id), &submission) {
        Ok(stored) => Json(stored.confirmation_view()).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<EventSubmissionService<R, N>>>,
    Path(event_id): Path<String>,
) -> Response
where
    R: EventRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    match service.get(&EventId(event_id)) {
        Ok(stored) => Json(stored.confirmation_view()).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn tiers_handler<R, N>(
    State(service): State<Arc<EventSubmissionService<R, N>>>,
) -> Response
where
    R: EventRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    Json(service.catalog().views()).into_response()
}

/// Map workflow failures onto transport codes and a uniform error body.
///
/// Unknown-tier failures render a generic message; the supplied value is
/// already logged at intake and never echoed back to callers.
fn error_response(error: EventServiceError) -> Response {
    match error {
        EventServiceError::Submission(SubmissionError::Media(media)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": {
                    "kind": "media_rejected",
                    "message": media.to_string(),
                    "violations": media
                        .violations()
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>(),
                }
            })),
        )
            .into_response(),
        EventServiceError::Submission(SubmissionError::MissingFields(fields)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": {
                    "kind": "missing_fields",
                    "message": format!("missing required fields: {}", fields.join(", ")),
                    "fields": fields,
                }
            })),
        )
            .into_response(),
        EventServiceError::Submission(SubmissionError::UnknownTier { .. }) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": {
                    "kind": "internal",
                    "message": "submission could not be processed",
                }
            })),
        )
            .into_response(),
        EventServiceError::Repository(RepositoryError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": {"kind": "not_found", "message": "event not found"}
            })),
        )
            .into_response(),
        EventServiceError::Repository(RepositoryError::Conflict) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": {"kind": "conflict", "message": "event already exists"}
            })),
        )
            .into_response(),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": {"kind": "internal", "message": other.to_string()}
            })),
        )
            .into_response(),
    }
}
