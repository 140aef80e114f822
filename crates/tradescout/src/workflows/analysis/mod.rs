//! Free-text job-description analysis.
//!
//! The pattern path: extract signals from the input text, pull a bounded
//! sample of similar historical jobs from the archive, aggregate
//! frequency statistics, and assemble whichever facets the caller
//! requested. Everything downstream of the store round trips degrades to
//! sparse low-confidence output instead of failing.

mod aggregate;
pub mod domain;
mod facets;
pub mod router;
mod sample;
pub mod signals;
mod service;

#[cfg(test)]
mod tests;

pub use aggregate::{PatternSummary, PriceStats};
pub use domain::{
    AnalysisFacet, AnalysisResult, Classification, CompletionCheck, Confidence, DetailKeyword,
    DetailSeverity, HistoricalJob, JobId, JobSize, KnownDetails, MissingDetail, PriceFactors,
    SuggestedQuestion,
};
pub use router::analysis_router;
pub use sample::{clamp_sample_size, search_terms, FALLBACK_THRESHOLD};
pub use service::{AnalysisError, AnalysisRequest, JobAnalyzer, MIN_DESCRIPTION_LEN};
pub use signals::{extract_signals, JobSignals};
