use super::domain::SubScores;
use super::weights::WeightVector;

/// Weighted sum of the three sub-scores. Pure and deterministic; the
/// result only exceeds 1 when quality sits on a multi-point rating scale.
pub fn composite_score(scores: SubScores, weights: &WeightVector) -> f64 {
    scores.quality * weights.quality
        + scores.reliability * weights.reliability
        + scores.value * weights.value
}
