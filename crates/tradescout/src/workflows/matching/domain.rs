use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::weights::WeightVector;

/// Identifier wrapper for directory profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradieId(pub String);

/// A service-provider record as returned by the directory. Profiles are
/// read-only query results; they are scored and discarded per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradieProfile {
    pub tradie_id: TradieId,
    pub business_name: String,
    pub postcode: Option<String>,
    pub suburb: Option<String>,
    pub area: Option<String>,
    pub region: Option<String>,
    /// Star rating on a bounded scale; absent means unrated.
    pub rating: Option<f64>,
    pub jobs_completed: u32,
    pub review_count: u32,
    /// Share of quoted jobs the tradie engaged with, as a percentage.
    pub engagement_rate_pct: Option<f64>,
    /// Fraction of jobs rejected, in [0, 1]. Absent or zero means no
    /// usable reliability data.
    pub rejection_rate: Option<f64>,
    /// When the tradie joined the directory. Informational only; scoring
    /// never reads it.
    #[serde(default)]
    pub member_since: Option<NaiveDate>,
}

impl TradieProfile {
    pub fn sub_scores(&self) -> SubScores {
        SubScores {
            quality: self.rating.unwrap_or(0.0),
            reliability: match self.rejection_rate {
                Some(rate) if rate > 0.0 => 1.0 - rate,
                // No recorded rejections earns no reliability credit.
                _ => 0.0,
            },
            value: if self.review_count > 0 { 1.0 } else { 0.5 },
        }
    }
}

/// The three normalized inputs to the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubScores {
    pub quality: f64,
    pub reliability: f64,
    pub value: f64,
}

/// Exact-match location constraints, ANDed together. Empty filters mean
/// the unfiltered directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationFilters {
    pub postcode: Option<String>,
    pub suburb: Option<String>,
    pub area: Option<String>,
    pub region: Option<String>,
}

fn field_matches(filter: &Option<String>, value: &Option<String>) -> bool {
    match filter {
        None => true,
        Some(wanted) => value
            .as_deref()
            .map(|actual| actual.eq_ignore_ascii_case(wanted))
            .unwrap_or(false),
    }
}

impl LocationFilters {
    pub fn is_empty(&self) -> bool {
        self.postcode.is_none()
            && self.suburb.is_none()
            && self.area.is_none()
            && self.region.is_none()
    }

    /// Case-insensitive conjunction over the present filters. Shared by
    /// directory implementations so they agree on match semantics.
    pub fn matches(&self, profile: &TradieProfile) -> bool {
        field_matches(&self.postcode, &profile.postcode)
            && field_matches(&self.suburb, &profile.suburb)
            && field_matches(&self.area, &profile.area)
            && field_matches(&self.region, &profile.region)
    }
}

/// A profile plus the score and weights that produced its position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTradie {
    pub profile: TradieProfile,
    pub score: f64,
    pub weights: WeightVector,
}
