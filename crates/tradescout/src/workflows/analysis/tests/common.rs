use std::sync::Arc;

use crate::workflows::analysis::domain::{HistoricalJob, JobId, JobSize};
use crate::workflows::analysis::{AnalysisRequest, JobAnalyzer};
use crate::workflows::store::{JobArchive, StoreError};

pub(super) fn job(id: &str, size: JobSize, description: &str, price: Option<f64>) -> HistoricalJob {
    HistoricalJob {
        job_id: JobId(id.to_string()),
        category: "painting".to_string(),
        subtype: Some("interior".to_string()),
        size,
        description: Some(description.to_string()),
        cleaned_description: Some(description.to_ascii_lowercase()),
        price,
    }
}

/// A sample where ceilings and storeys dominate, sized for high
/// confidence.
pub(super) fn painting_sample() -> Vec<HistoricalJob> {
    vec![
        job(
            "j1",
            JobSize::Medium,
            "paint walls and ceilings in double storey house",
            Some(3000.0),
        ),
        job(
            "j2",
            JobSize::Medium,
            "repaint bedroom walls and ceilings",
            Some(1000.0),
        ),
        job(
            "j3",
            JobSize::Large,
            "full interior repaint, ceilings and trims, single storey",
            Some(5000.0),
        ),
        job(
            "j4",
            JobSize::Small,
            "paint ceilings in two storey townhouse",
            None,
        ),
        job(
            "j5",
            JobSize::Medium,
            "paint ceiling and storey stairwell walls",
            Some(0.0),
        ),
    ]
}

pub(super) fn analyzer(jobs: Vec<HistoricalJob>) -> JobAnalyzer<StaticArchive> {
    JobAnalyzer::new(Arc::new(StaticArchive::with(jobs)))
}

pub(super) fn request(description: &str) -> AnalysisRequest {
    AnalysisRequest {
        description: description.to_string(),
        known_details: Default::default(),
        facets: Vec::new(),
        sample_size: None,
    }
}

/// Archive double: similarity search is substring containment over both
/// description variants, the random sample is the head of the backing
/// list.
#[derive(Default, Clone)]
pub(super) struct StaticArchive {
    pub(super) jobs: Vec<HistoricalJob>,
}

impl StaticArchive {
    pub(super) fn with(jobs: Vec<HistoricalJob>) -> Self {
        Self { jobs }
    }
}

impl JobArchive for StaticArchive {
    fn similar_jobs(
        &self,
        terms: &[String],
        bias_category: Option<&str>,
        limit: usize,
    ) -> Result<Vec<HistoricalJob>, StoreError> {
        let mut matched: Vec<HistoricalJob> = self
            .jobs
            .iter()
            .filter(|job| {
                let text = job.match_text().to_ascii_lowercase();
                terms.iter().any(|term| text.contains(term.as_str()))
            })
            .cloned()
            .collect();

        if let Some(category) = bias_category {
            matched.sort_by_key(|job| !job.category.eq_ignore_ascii_case(category));
        }

        matched.truncate(limit);
        Ok(matched)
    }

    fn random_jobs(&self, limit: usize) -> Result<Vec<HistoricalJob>, StoreError> {
        Ok(self.jobs.iter().take(limit).cloned().collect())
    }
}

pub(super) struct UnavailableArchive;

impl JobArchive for UnavailableArchive {
    fn similar_jobs(
        &self,
        _terms: &[String],
        _bias_category: Option<&str>,
        _limit: usize,
    ) -> Result<Vec<HistoricalJob>, StoreError> {
        Err(StoreError::Unavailable("archive offline".to_string()))
    }

    fn random_jobs(&self, _limit: usize) -> Result<Vec<HistoricalJob>, StoreError> {
        Err(StoreError::Unavailable("archive offline".to_string()))
    }
}
