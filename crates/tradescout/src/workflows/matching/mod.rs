//! Ranked search over the tradie directory.
//!
//! The ranking path normalizes caller preference weights, scores every
//! candidate returned by a single directory read, and produces a
//! deterministic, bounded ordering.

pub mod domain;
mod ranker;
pub mod router;
mod scoring;
pub mod weights;

#[cfg(test)]
mod tests;

pub use domain::{LocationFilters, ScoredTradie, SubScores, TradieId, TradieProfile};
pub use ranker::{MatchRanker, RankRequest, MAX_RESULT_LIMIT, MIN_RESULT_LIMIT};
pub use router::match_router;
pub use scoring::composite_score;
pub use weights::{WeightPreferences, WeightVector};
