use crate::workflows::events::{EventMediaBundle, ImageSubmission, TicketTier, TierId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The raw submission form exactly as organizers send it.
///
/// Every field is defaulted so a partial payload still deserializes; what is
/// actually required is decided during intake, which reports every missing
/// field at once instead of failing on the first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSubmission {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub organizer_name: String,
    #[serde(default)]
    pub organizer_currency: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub images: Vec<ImageSubmission>,
    #[serde(default, alias = "media")]
    pub videos: Vec<String>,
    #[serde(default, alias = "pricing_tier")]
    pub promotion_tier: Option<String>,
    #[serde(default)]
    pub ticketing: Value,
}

/// Core listing fields after validation; always complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDetails {
    pub title: String,
    pub category: String,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub description: String,
    pub venue: String,
    pub organizer_name: String,
    pub capacity: u32,
}

/// A fully validated event, independent of storage identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub details: EventDetails,
    pub ticketing: Vec<TicketTier>,
    pub media: EventMediaBundle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Submitted,
    Published,
    Archived,
}

impl ListingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

/// An event as persisted, with its lifecycle status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEvent {
    pub event_id: EventId,
    pub status: ListingStatus,
    pub record: EventRecord,
}

impl StoredEvent {
    pub fn confirmation_view(&self) -> EventConfirmationView {
        EventConfirmationView {
            event_id: self.event_id.0.clone(),
            status: self.status.label(),
            title: self.record.details.title.clone(),
            promotion_tier: self.record.media.tier,
            image_count: self.record.media.images.len(),
            video_count: self.record.media.videos.len(),
            ticket_tiers: self.record.ticketing.clone(),
        }
    }
}

/// Confirmation payload returned to organizers after a submission lands.
#[derive(Debug, Clone, Serialize)]
pub struct EventConfirmationView {
    pub event_id: String,
    pub status: &'static str,
    pub title: String,
    pub promotion_tier: TierId,
    pub image_count: usize,
    pub video_count: usize,
    pub ticket_tiers: Vec<TicketTier>,
}
