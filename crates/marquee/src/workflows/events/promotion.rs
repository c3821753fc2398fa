use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierId {
    Free,
    Featured,
    Boost,
}

impl TierId {
    pub const fn ordered() -> [Self; 3] {
        [Self::Free, Self::Featured, Self::Boost]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Featured => "featured",
            Self::Boost => "boost",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Free => "Free Listing",
            Self::Featured => "Featured",
            Self::Boost => "Boost",
        }
    }

    pub const fn is_paid(self) -> bool {
        !matches!(self, Self::Free)
    }

    /// Parse an organizer-supplied tier name. Unrecognized values are an
    /// integration fault handled by the caller, never guessed at here.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "free" => Some(Self::Free),
            "featured" => Some(Self::Featured),
            "boost" => Some(Self::Boost),
            _ => None,
        }
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingPeriod {
    None,
    PerWeek,
    PerMonth,
}

impl BillingPeriod {
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "no charge",
            Self::PerWeek => "per week",
            Self::PerMonth => "per month",
        }
    }
}

/// Full tier definition consumed by quota enforcement and pricing surfaces.
#[derive(Debug, Clone, Serialize)]
pub struct PromotionTier {
    pub id: TierId,
    pub price_amount: f64,
    pub billing_period: BillingPeriod,
    pub image_quota: u32,
    pub video_quota: u32,
    pub features: Vec<&'static str>,
}

impl PromotionTier {
    pub fn view(&self) -> TierView {
        TierView {
            id: self.id,
            price_amount: self.price_amount,
            billing_period: self.billing_period,
            features: self.features.clone(),
        }
    }
}

/// Read-only projection served to the pricing and marketing UI.
#[derive(Debug, Clone, Serialize)]
pub struct TierView {
    pub id: TierId,
    pub price_amount: f64,
    pub billing_period: BillingPeriod,
    pub features: Vec<&'static str>,
}

/// Catalog holding exactly one definition per tier.
///
/// The three slots (rather than a keyed map) make lookups total: `get` cannot
/// miss, so string-to-tier conversion failures stay at the intake boundary.
#[derive(Debug, Clone)]
pub struct TierCatalog {
    free: PromotionTier,
    featured: PromotionTier,
    boost: PromotionTier,
}

impl TierCatalog {
    /// The production catalog.
    pub fn standard() -> Self {
        Self::new(
            PromotionTier {
                id: TierId::Free,
                price_amount: 0.0,
                billing_period: BillingPeriod::None,
                image_quota: 1,
                video_quota: 0,
                features: vec![
                    "Standard placement in search and category pages.",
                    "One cover image on the event page.",
                ],
            },
            PromotionTier {
                id: TierId::Featured,
                price_amount: 19.0,
                billing_period: BillingPeriod::PerWeek,
                image_quota: 5,
                video_quota: 1,
                features: vec![
                    "Highlighted card in category browse and search results.",
                    "Gallery of up to 5 images and 1 embedded video.",
                    "Featured badge on the event page.",
                ],
            },
            PromotionTier {
                id: TierId::Boost,
                price_amount: 49.0,
                billing_period: BillingPeriod::PerMonth,
                image_quota: 10,
                video_quota: 3,
                features: vec![
                    "Homepage carousel placement while the boost is active.",
                    "Top-of-category ranking in search results.",
                    "Gallery of up to 10 images and 3 embedded videos.",
                    "Weekly performance summary on the organizer dashboard.",
                ],
            },
        )
    }

    /// Build a catalog from three definitions, forcing each into its slot so
    /// the one-entry-per-tier invariant holds no matter what ids were set.
    pub fn new(
        mut free: PromotionTier,
        mut featured: PromotionTier,
        mut boost: PromotionTier,
    ) -> Self {
        free.id = TierId::Free;
        featured.id = TierId::Featured;
        boost.id = TierId::Boost;

        Self {
            free,
            featured,
            boost,
        }
    }

    pub fn get(&self, id: TierId) -> &PromotionTier {
        match id {
            TierId::Free => &self.free,
            TierId::Featured => &self.featured,
            TierId::Boost => &self.boost,
        }
    }

    /// Tiers in display order: ascending price.
    pub fn tiers(&self) -> [&PromotionTier; 3] {
        let mut ordered = [&self.free, &self.featured, &self.boost];
        ordered.sort_by(|a, b| a.price_amount.total_cmp(&b.price_amount));
        ordered
    }

    pub fn views(&self) -> Vec<TierView> {
        self.tiers().into_iter().map(PromotionTier::view).collect()
    }
}

impl Default for TierCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
