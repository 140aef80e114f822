use serde::{Deserialize, Deserializer, Serialize};

/// Base weights merged under whatever the caller supplies. Deliberately
/// not perfectly uniform; quality carries the extra hundredth.
pub const BASE_QUALITY: f64 = 0.34;
pub const BASE_RELIABILITY: f64 = 0.33;
pub const BASE_VALUE: f64 = 0.33;

/// Caller-supplied importance weights. Any subset of keys may be present;
/// non-numeric entries deserialize to `None` rather than failing, since
/// normalization silently sanitizes bad input.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeightPreferences {
    #[serde(deserialize_with = "lenient_weight")]
    pub quality: Option<f64>,
    #[serde(deserialize_with = "lenient_weight")]
    pub reliability: Option<f64>,
    #[serde(deserialize_with = "lenient_weight")]
    pub value: Option<f64>,
}

fn lenient_weight<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.as_f64()).filter(|w| w.is_finite()))
}

/// Complete convex combination over the three sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightVector {
    pub quality: f64,
    pub reliability: f64,
    pub value: f64,
}

impl WeightVector {
    /// Merge preferences over the base defaults and normalize so the
    /// three weights sum to 1. Negative entries are clamped to zero and
    /// an all-zero merge falls back to the base vector, so the output
    /// invariant holds for every input.
    pub fn normalize(prefs: &WeightPreferences) -> Self {
        let mut quality = sanitize(prefs.quality, BASE_QUALITY);
        let mut reliability = sanitize(prefs.reliability, BASE_RELIABILITY);
        let mut value = sanitize(prefs.value, BASE_VALUE);

        let mut sum = quality + reliability + value;
        if sum <= f64::EPSILON {
            quality = BASE_QUALITY;
            reliability = BASE_RELIABILITY;
            value = BASE_VALUE;
            sum = quality + reliability + value;
        }

        Self {
            quality: quality / sum,
            reliability: reliability / sum,
            value: value / sum,
        }
    }
}

fn sanitize(supplied: Option<f64>, base: f64) -> f64 {
    supplied.map(|w| w.max(0.0)).unwrap_or(base)
}
