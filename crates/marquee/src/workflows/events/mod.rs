//! Event listings: promotion tiers, media intake, and the submission
//! workflow that turns an organizer's raw form into a stored event.

pub mod submission;

mod media;
mod promotion;
mod ticketing;
mod video;

pub use media::{
    EventImage, EventMediaBundle, ImageSubmission, MediaError, MediaQuota, MediaValidator,
    MediaViolation,
};
pub use promotion::{BillingPeriod, PromotionTier, TierCatalog, TierId, TierView};
pub use ticketing::{normalize_ticketing, TicketTier, DEFAULT_TICKET_LABEL};
pub use video::{resolve_video, VideoPlatform, VideoReference};

pub(crate) use ticketing::sanitize_currency;
