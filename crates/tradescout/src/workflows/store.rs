//! Read-only store traits consumed by the matching and analysis engines.
//!
//! Both operations are pure functions of their inputs plus the current
//! store contents, so the traits expose single bulk reads with no
//! pagination or retry contract. Connection handling belongs to the
//! implementations.

use crate::workflows::analysis::domain::HistoricalJob;
use crate::workflows::matching::domain::{LocationFilters, TradieProfile};

/// Failure of a store round trip. An empty result set is not an error;
/// callers need the distinction to tell "no matches" from "system down".
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store returned malformed data: {0}")]
    Malformed(String),
}

/// Directory of service-provider records eligible for ranking.
pub trait TradieDirectory: Send + Sync {
    /// Fetch every profile matching the filters in one read. Empty
    /// filters mean the unfiltered set.
    fn query_tradies(&self, filters: &LocationFilters) -> Result<Vec<TradieProfile>, StoreError>;
}

/// Archive of completed jobs sampled during pattern analysis.
pub trait JobArchive: Send + Sync {
    /// Substring/similarity search biased toward `bias_category` when
    /// given, without excluding other categories.
    fn similar_jobs(
        &self,
        terms: &[String],
        bias_category: Option<&str>,
        limit: usize,
    ) -> Result<Vec<HistoricalJob>, StoreError>;

    /// Unfiltered sample used when the similarity query is too sparse.
    fn random_jobs(&self, limit: usize) -> Result<Vec<HistoricalJob>, StoreError>;
}
