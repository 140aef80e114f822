use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use super::aggregate::PatternSummary;
use super::domain::{AnalysisFacet, AnalysisResult, Confidence, KnownDetails};
use super::facets::{self, FacetContext};
use super::sample::{
    clamp_sample_size, merge_with_fallback, rank_by_similarity, search_terms, FALLBACK_THRESHOLD,
};
use super::signals::extract_signals;
use crate::workflows::store::{JobArchive, StoreError};

/// Descriptions shorter than this are rejected before any store round
/// trip.
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// Job-analysis request. Facets default to next_question and
/// classification when the caller names none.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub description: String,
    #[serde(default)]
    pub known_details: KnownDetails,
    #[serde(default)]
    pub facets: Vec<AnalysisFacet>,
    #[serde(default)]
    pub sample_size: Option<usize>,
}

/// Error raised by the analyzer. Only the input guard and the archive
/// round trips can fail; everything downstream degrades instead.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("description must be at least {MIN_DESCRIPTION_LEN} characters, got {length}")]
    DescriptionTooShort { length: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Stateless pattern analyzer over an injected job archive.
pub struct JobAnalyzer<A> {
    archive: Arc<A>,
}

impl<A> JobAnalyzer<A>
where
    A: JobArchive + 'static,
{
    pub fn new(archive: Arc<A>) -> Self {
        Self { archive }
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let description = request.description.trim();
        if description.len() < MIN_DESCRIPTION_LEN {
            return Err(AnalysisError::DescriptionTooShort {
                length: description.len(),
            });
        }

        let sample_size = clamp_sample_size(request.sample_size);
        let terms = search_terms(description);
        let bias = request.known_details.category.as_deref();

        let fetched = self.archive.similar_jobs(&terms, bias, sample_size)?;
        let mut sample = rank_by_similarity(fetched, &terms, sample_size);

        // A sparse similarity sample gets padded with random archive
        // material so the aggregation always has something to work with,
        // at the cost of relevance.
        if sample.len() < FALLBACK_THRESHOLD {
            let fallback = self.archive.random_jobs(sample_size)?;
            sample = merge_with_fallback(sample, fallback, sample_size);
        }

        debug!(
            sample = sample.len(),
            terms = terms.len(),
            "assembled historical sample for analysis"
        );

        let signals = extract_signals(description);
        let summary = PatternSummary::aggregate(&sample);
        let ctx = FacetContext {
            signals: &signals,
            known: &request.known_details,
            summary: &summary,
        };

        let facets = if request.facets.is_empty() {
            AnalysisFacet::defaults()
        } else {
            request.facets.clone()
        };

        let mut result = AnalysisResult {
            sample_count: summary.sample_count,
            confidence: Confidence::from_sample_count(summary.sample_count),
            next_question: None,
            classification: None,
            missing_details: None,
            price_factors: None,
            completion_check: None,
        };

        for facet in facets {
            match facet {
                AnalysisFacet::NextQuestion => {
                    result.next_question = facets::next_question(&ctx);
                }
                AnalysisFacet::Classification => {
                    result.classification = Some(facets::classification(&ctx));
                }
                AnalysisFacet::MissingDetails => {
                    result.missing_details = Some(facets::missing_details(&ctx));
                }
                AnalysisFacet::PriceFactors => {
                    result.price_factors = facets::price_factors(&ctx);
                }
                AnalysisFacet::CompletionCheck => {
                    result.completion_check = Some(facets::completion_check(&ctx));
                }
            }
        }

        Ok(result)
    }
}
