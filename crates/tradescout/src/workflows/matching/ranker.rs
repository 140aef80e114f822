use std::sync::Arc;

use serde::Deserialize;
use tracing::warn;

use super::domain::{LocationFilters, ScoredTradie};
use super::scoring::composite_score;
use super::weights::{WeightPreferences, WeightVector};
use crate::workflows::store::{StoreError, TradieDirectory};

pub const MIN_RESULT_LIMIT: usize = 1;
pub const MAX_RESULT_LIMIT: usize = 10;
const DEFAULT_RESULT_LIMIT: usize = 5;

/// Ranked-search request. The limit is clamped into
/// [`MIN_RESULT_LIMIT`, `MAX_RESULT_LIMIT`] regardless of what the
/// caller asks for.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RankRequest {
    pub filters: LocationFilters,
    pub limit: Option<usize>,
    pub weights: WeightPreferences,
}

/// Stateless ranking service over an injected directory.
pub struct MatchRanker<D> {
    directory: Arc<D>,
}

impl<D> MatchRanker<D>
where
    D: TradieDirectory + 'static,
{
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Fetch, score, sort, and truncate. An empty result signals "no
    /// matches" and is not an error; only directory failures propagate.
    pub fn rank(&self, request: &RankRequest) -> Result<Vec<ScoredTradie>, StoreError> {
        let weights = WeightVector::normalize(&request.weights);
        let candidates = self.directory.query_tradies(&request.filters)?;

        if request.filters.is_empty() {
            warn!(
                candidates = candidates.len(),
                "ranking request without location filters scanned the full directory"
            );
        }

        let mut scored: Vec<ScoredTradie> = candidates
            .into_iter()
            .map(|profile| {
                let score = composite_score(profile.sub_scores(), &weights);
                ScoredTradie {
                    profile,
                    score,
                    weights,
                }
            })
            .collect();

        // Stable sort: ties on score fall back to review count, then to
        // directory order, keeping the ranking deterministic.
        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(b.profile.review_count.cmp(&a.profile.review_count))
        });

        scored.truncate(clamp_limit(request.limit));
        Ok(scored)
    }
}

fn clamp_limit(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(DEFAULT_RESULT_LIMIT)
        .clamp(MIN_RESULT_LIMIT, MAX_RESULT_LIMIT)
}
