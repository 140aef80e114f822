use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tradescout::workflows::analysis::{HistoricalJob, JobId, JobSize};
use tradescout::workflows::matching::{LocationFilters, TradieId, TradieProfile};
use tradescout::workflows::store::{JobArchive, StoreError, TradieDirectory};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Directory backed by a fixed profile list. Hydrated once at startup,
/// from a CSV export or the built-in seed, and read-only afterwards.
#[derive(Default, Clone)]
pub(crate) struct InMemoryTradieDirectory {
    profiles: Vec<TradieProfile>,
}

impl InMemoryTradieDirectory {
    pub(crate) fn new(profiles: Vec<TradieProfile>) -> Self {
        Self { profiles }
    }

    pub(crate) fn seeded() -> Self {
        Self::new(seed_tradies())
    }
}

impl TradieDirectory for InMemoryTradieDirectory {
    fn query_tradies(&self, filters: &LocationFilters) -> Result<Vec<TradieProfile>, StoreError> {
        Ok(self
            .profiles
            .iter()
            .filter(|profile| filters.matches(profile))
            .cloned()
            .collect())
    }
}

/// Job archive backed by a fixed job list. "Random" sampling is a head
/// slice, which keeps CLI and demo output reproducible.
#[derive(Default, Clone)]
pub(crate) struct InMemoryJobArchive {
    jobs: Vec<HistoricalJob>,
}

impl InMemoryJobArchive {
    pub(crate) fn new(jobs: Vec<HistoricalJob>) -> Self {
        Self { jobs }
    }

    pub(crate) fn seeded() -> Self {
        Self::new(seed_jobs())
    }
}

impl JobArchive for InMemoryJobArchive {
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

fn profile(
    id: &str,
    name: &str,
    suburb: &str,
    postcode: &str,
    rating: Option<f64>,
    jobs_completed: u32,
    review_count: u32,
    rejection_rate: Option<f64>,
) -> TradieProfile {
    TradieProfile {
        tradie_id: TradieId(id.to_string()),
        business_name: name.to_string(),
        postcode: Some(postcode.to_string()),
        suburb: Some(suburb.to_string()),
        area: Some("St George".to_string()),
        region: Some("Sydney".to_string()),
        rating,
        jobs_completed,
        review_count,
        engagement_rate_pct: Some(90.0),
        rejection_rate,
        member_since: None,
    }
}

fn seed_tradies() -> Vec<TradieProfile> {
    vec![
        profile("t-101", "Brush Bros Painting", "Peakhurst", "2210", Some(4.8), 210, 64, Some(0.04)),
        profile("t-102", "Roller Co", "Peakhurst", "2210", Some(4.5), 95, 31, Some(0.08)),
        profile("t-103", "St George Painters", "Hurstville", "2220", Some(4.9), 340, 120, Some(0.02)),
        profile("t-104", "Fresh Coat Crew", "Mortdale", "2223", Some(4.2), 48, 12, Some(0.11)),
        profile("t-105", "Penshurst Painting", "Penshurst", "2222", None, 6, 0, None),
        profile("t-106", "Bayside Brushworks", "Oatley", "2223", Some(4.6), 130, 55, Some(0.06)),
    ]
}

fn job(
    id: &str,
    subtype: &str,
    size: JobSize,
    description: &str,
    price: Option<f64>,
) -> HistoricalJob {
    HistoricalJob {
        job_id: JobId(id.to_string()),
        category: "painting".to_string(),
        subtype: Some(subtype.to_string()),
        size,
        description: Some(description.to_string()),
        cleaned_description: None,
        price,
    }
}

fn seed_jobs() -> Vec<HistoricalJob> {
    vec![
        job(
            "j-201",
            "interior",
            JobSize::Medium,
            "paint 3 bedrooms walls and ceilings in single storey house",
            Some(2800.0),
        ),
        job(
            "j-202",
            "interior",
            JobSize::Small,
            "repaint one bedroom walls ceilings and trims",
            Some(950.0),
        ),
        job(
            "j-203",
            "interior",
            JobSize::Large,
            "full interior repaint double storey house ceilings trims doors",
            Some(8200.0),
        ),
        job(
            "j-204",
            "exterior",
            JobSize::Medium,
            "exterior walls and fascia two storey house approx 180 sqm",
            Some(5400.0),
        ),
        job(
            "j-205",
            "interior",
            JobSize::Medium,
            "paint kitchen living and hallway walls only apartment",
            Some(2100.0),
        ),
        job(
            "j-206",
            "interior",
            JobSize::Small,
            "touch up bathroom ceiling after leak repair",
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_applies_location_filters() {
        let directory = InMemoryTradieDirectory::seeded();
        let filters = LocationFilters {
            suburb: Some("peakhurst".to_string()),
            ..LocationFilters::default()
        };
        let matched = directory.query_tradies(&filters).expect("query succeeds");
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|p| p.suburb.as_deref() == Some("Peakhurst")));
    }

    #[test]
    fn archive_matches_terms_and_respects_limit() {
        let archive = InMemoryJobArchive::seeded();
        let terms = vec!["ceilings".to_string()];
        let jobs = archive.similar_jobs(&terms, None, 2).expect("query succeeds");
        assert_eq!(jobs.len(), 2);
        assert!(jobs
            .iter()
            .all(|job| job.match_text().contains("ceilings")));
    }

    #[test]
    fn archive_bias_reorders_by_category() {
        let archive = InMemoryJobArchive::new(vec![
            HistoricalJob {
                job_id: JobId("a".to_string()),
                category: "plastering".to_string(),
                subtype: None,
                size: JobSize::Small,
                description: Some("patch walls".to_string()),
                cleaned_description: None,
                price: None,
            },
            HistoricalJob {
                job_id: JobId("b".to_string()),
                category: "painting".to_string(),
                subtype: None,
                size: JobSize::Small,
                description: Some("paint walls".to_string()),
                cleaned_description: None,
                price: None,
            },
        ]);
        let terms = vec!["walls".to_string()];
        let jobs = archive
            .similar_jobs(&terms, Some("painting"), 10)
            .expect("query succeeds");
        assert_eq!(jobs[0].job_id.0, "b");
    }
}
