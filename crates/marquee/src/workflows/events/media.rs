use super::promotion::{TierCatalog, TierId};
use super::video::{resolve_video, VideoReference};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One gallery image as submitted by an organizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSubmission {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

/// A stored gallery image with its repaired display position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventImage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub order: u32,
}

/// Validated media attached to an event, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMediaBundle {
    pub tier: TierId,
    pub images: Vec<EventImage>,
    pub videos: Vec<VideoReference>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaQuota {
    Images,
    Videos,
}

impl MediaQuota {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::Videos => "videos",
        }
    }
}

impl fmt::Display for MediaQuota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single reason a media set was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaViolation {
    #[error("every listing needs at least one image")]
    MissingImages,
    #[error(
        "{quota} quota exceeded for the {tier} tier: submitted {submitted}, allowed {allowed}; upgrade the promotion tier to raise the limit"
    )]
    QuotaExceeded {
        quota: MediaQuota,
        tier: TierId,
        submitted: usize,
        allowed: u32,
    },
    #[error("unsupported video url: {url}")]
    UnsupportedVideoUrl { url: String },
}

/// Every violation found in one pass, so organizers fix a submission once.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaError {
    violations: Vec<MediaViolation>,
}

impl MediaError {
    pub(crate) fn new(violations: Vec<MediaViolation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[MediaViolation] {
        &self.violations
    }
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("media rejected: ")?;
        for (index, violation) in self.violations.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for MediaError {}

/// Enforces tier quotas and video allow-list rules over submitted media.
///
/// Oversized galleries are refused, never trimmed to fit; an organizer who
/// paid for ten slots and uploaded eleven decides which one goes.
#[derive(Debug, Clone, Default)]
pub struct MediaValidator {
    catalog: TierCatalog,
}

impl MediaValidator {
    pub fn new(catalog: TierCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &TierCatalog {
        &self.catalog
    }

    pub fn validate(
        &self,
        tier: TierId,
        images: &[ImageSubmission],
        videos: &[String],
    ) -> Result<EventMediaBundle, MediaError> {
        let limits = self.catalog.get(tier);
        let mut violations = Vec::new();

        if images.is_empty() {
            violations.push(MediaViolation::MissingImages);
        } else if images.len() > limits.image_quota as usize {
            violations.push(MediaViolation::QuotaExceeded {
                quota: MediaQuota::Images,
                tier,
                submitted: images.len(),
                allowed: limits.image_quota,
            });
        }

        if videos.len() > limits.video_quota as usize {
            violations.push(MediaViolation::QuotaExceeded {
                quota: MediaQuota::Videos,
                tier,
                submitted: videos.len(),
                allowed: limits.video_quota,
            });
        }

        let mut resolved = Vec::with_capacity(videos.len());
        for url in videos {
            match resolve_video(url) {
                Some(reference) => resolved.push(reference),
                None => violations.push(MediaViolation::UnsupportedVideoUrl { url: url.clone() }),
            }
        }

        if !violations.is_empty() {
            return Err(MediaError::new(violations));
        }

        Ok(EventMediaBundle {
            tier,
            images: repair_image_order(images),
            videos: resolved,
        })
    }
}

/// Rewrite submitted positions into a dense zero-based sequence.
///
/// Submitted orders win, arrival position breaks ties, and images without a
/// position land after every positioned one.
fn repair_image_order(images: &[ImageSubmission]) -> Vec<EventImage> {
    let mut indexed: Vec<(usize, &ImageSubmission)> = images.iter().enumerate().collect();
    indexed.sort_by_key(|(position, image)| match image.order {
        Some(order) => (0u8, order, *position),
        None => (1u8, 0, *position),
    });

    indexed
        .into_iter()
        .enumerate()
        .map(|(order, (_, image))| EventImage {
            url: image.url.clone(),
            caption: image.caption.clone(),
            order: order as u32,
        })
        .collect()
}
