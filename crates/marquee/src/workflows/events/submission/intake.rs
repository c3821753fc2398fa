use super::domain::{EventDetails, EventRecord, EventSubmission};
use crate::workflows::events::{
    normalize_ticketing, sanitize_currency, MediaError, MediaValidator, TierCatalog, TierId,
};
use thiserror::Error;

pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    /// The supplied value is kept for operators; the rendered message stays
    /// generic because tier names are an internal configuration concern.
    #[error("promotion tier could not be applied")]
    UnknownTier { supplied: String },
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// Turns raw submissions into validated event records.
///
/// Intake is pure and deterministic: identifiers, clocks, and storage all
/// live a layer above, so the same submission always yields the same record.
#[derive(Debug, Clone)]
pub struct EventIntake {
    validator: MediaValidator,
    default_currency: String,
}

impl EventIntake {
    pub fn new(catalog: TierCatalog, default_currency: impl Into<String>) -> Self {
        let supplied = default_currency.into();
        let default_currency =
            sanitize_currency(&supplied).unwrap_or_else(|| DEFAULT_CURRENCY.to_owned());
        Self {
            validator: MediaValidator::new(catalog),
            default_currency,
        }
    }

    pub fn catalog(&self) -> &TierCatalog {
        self.validator.catalog()
    }

    pub fn default_currency(&self) -> &str {
        &self.default_currency
    }

    /// Run the full intake pipeline over one submission.
    ///
    /// Stages run in a fixed order and each failing stage stops the run:
    /// promotion tier, then ticketing, then media, then required fields.
    /// Within a stage every problem is collected before failing.
    pub fn record_from_submission(
        &self,
        submission: &EventSubmission,
    ) -> Result<EventRecord, SubmissionError> {
        let tier = promotion_tier(submission)?;

        let currency = submission
            .organizer_currency
            .as_deref()
            .and_then(sanitize_currency)
            .unwrap_or_else(|| self.default_currency.clone());
        let ticketing = normalize_ticketing(&submission.ticketing, &currency);

        let media = self
            .validator
            .validate(tier, &submission.images, &submission.videos)?;

        let details = required_details(submission)?;

        Ok(EventRecord {
            details,
            ticketing,
            media,
        })
    }
}

impl Default for EventIntake {
    fn default() -> Self {
        Self::new(TierCatalog::standard(), DEFAULT_CURRENCY)
    }
}

/// An absent or blank tier means the organizer never chose one and gets the
/// free listing. A present but unrecognized name is an integration fault.
fn promotion_tier(submission: &EventSubmission) -> Result<TierId, SubmissionError> {
    let supplied = submission
        .promotion_tier
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty());
    let Some(raw) = supplied else {
        return Ok(TierId::Free);
    };

    match TierId::parse(raw) {
        Some(tier) => Ok(tier),
        None => {
            tracing::error!(supplied = raw, "submission referenced an unknown promotion tier");
            Err(SubmissionError::UnknownTier {
                supplied: raw.to_owned(),
            })
        }
    }
}

fn required_details(submission: &EventSubmission) -> Result<EventDetails, SubmissionError> {
    let mut missing = Vec::new();

    if submission.title.trim().is_empty() {
        missing.push("title");
    }
    if submission.category.trim().is_empty() {
        missing.push("category");
    }
    if submission.start_date.is_none() {
        missing.push("start_date");
    }
    if submission.description.trim().is_empty() {
        missing.push("description");
    }
    if submission.venue.trim().is_empty() {
        missing.push("venue");
    }
    if submission.organizer_name.trim().is_empty() {
        missing.push("organizer_name");
    }
    // Zero capacity is as unusable as no capacity at all.
    if matches!(submission.capacity, None | Some(0)) {
        missing.push("capacity");
    }

    match (submission.start_date, submission.capacity) {
        (Some(start_date), Some(capacity)) if missing.is_empty() => Ok(EventDetails {
            title: submission.title.trim().to_owned(),
            category: submission.category.trim().to_owned(),
            start_date,
            end_date: submission.end_date,
            description: submission.description.trim().to_owned(),
            venue: submission.venue.trim().to_owned(),
            organizer_name: submission.organizer_name.trim().to_owned(),
            capacity,
        }),
        _ => Err(SubmissionError::MissingFields(missing)),
    }
}
