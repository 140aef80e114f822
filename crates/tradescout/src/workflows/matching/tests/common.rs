use std::sync::Arc;

use crate::workflows::matching::domain::{LocationFilters, TradieId, TradieProfile};
use crate::workflows::matching::{MatchRanker, RankRequest, WeightPreferences};
use crate::workflows::store::{StoreError, TradieDirectory};

pub(super) fn profile(id: &str, rating: Option<f64>, reviews: u32) -> TradieProfile {
    TradieProfile {
        tradie_id: TradieId(id.to_string()),
        business_name: format!("Tradie {id}"),
        postcode: Some("2210".to_string()),
        suburb: Some("Peakhurst".to_string()),
        area: Some("St George".to_string()),
        region: Some("Sydney".to_string()),
        rating,
        jobs_completed: 50,
        review_count: reviews,
        engagement_rate_pct: Some(90.0),
        rejection_rate: Some(0.1),
        member_since: None,
    }
}

pub(super) fn weights(quality: f64, reliability: f64, value: f64) -> WeightPreferences {
    WeightPreferences {
        quality: Some(quality),
        reliability: Some(reliability),
        value: Some(value),
    }
}

pub(super) fn rank_request(profiles: &StaticDirectory) -> (MatchRanker<StaticDirectory>, RankRequest) {
    let ranker = MatchRanker::new(Arc::new(profiles.clone()));
    (ranker, RankRequest::default())
}

#[derive(Default, Clone)]
pub(super) struct StaticDirectory {
    pub(super) profiles: Vec<TradieProfile>,
}

impl StaticDirectory {
    pub(super) fn with(profiles: Vec<TradieProfile>) -> Self {
        Self { profiles }
    }
}

impl TradieDirectory for StaticDirectory {
    fn query_tradies(&self, filters: &LocationFilters) -> Result<Vec<TradieProfile>, StoreError> {
        Ok(self
            .profiles
            .iter()
            .filter(|profile| filters.matches(profile))
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableDirectory;

impl TradieDirectory for UnavailableDirectory {
    fn query_tradies(&self, _filters: &LocationFilters) -> Result<Vec<TradieProfile>, StoreError> {
        Err(StoreError::Unavailable("directory offline".to_string()))
    }
}
