use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{DetailKeyword, HistoricalJob, JobSize};

/// Price statistics over the positively-priced portion of the sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceStats {
    pub minimum: f64,
    pub maximum: f64,
    pub average: f64,
}

/// Frequency tables aggregated over one historical sample. Computed
/// fresh per request; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatternSummary {
    pub sample_count: usize,
    pub category_counts: BTreeMap<String, usize>,
    pub subtype_counts: BTreeMap<String, usize>,
    pub size_counts: BTreeMap<JobSize, usize>,
    pub detail_counts: BTreeMap<DetailKeyword, usize>,
    pub price_stats: Option<PriceStats>,
}

impl PatternSummary {
    pub fn aggregate(sample: &[HistoricalJob]) -> Self {
        let mut summary = PatternSummary {
            sample_count: sample.len(),
            ..PatternSummary::default()
        };

        let mut priced: Vec<f64> = Vec::new();
        for job in sample {
            *summary
                .category_counts
                .entry(job.category.to_ascii_lowercase())
                .or_insert(0) += 1;

            if let Some(subtype) = &job.subtype {
                *summary
                    .subtype_counts
                    .entry(subtype.to_ascii_lowercase())
                    .or_insert(0) += 1;
            }

            *summary.size_counts.entry(job.size).or_insert(0) += 1;

            let text = job.match_text();
            for keyword in DetailKeyword::ALL {
                if keyword.matches(text) {
                    *summary.detail_counts.entry(keyword).or_insert(0) += 1;
                }
            }

            if let Some(price) = job.price {
                if price > 0.0 {
                    priced.push(price);
                }
            }
        }

        if !priced.is_empty() {
            let minimum = priced.iter().copied().fold(f64::INFINITY, f64::min);
            let maximum = priced.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let average = priced.iter().sum::<f64>() / priced.len() as f64;
            summary.price_stats = Some(PriceStats {
                minimum,
                maximum,
                average,
            });
        }

        summary
    }

    /// Share of the sample mentioning a detail keyword, in [0, 1].
    pub fn detail_frequency(&self, keyword: DetailKeyword) -> f64 {
        if self.sample_count == 0 {
            return 0.0;
        }
        let count = self.detail_counts.get(&keyword).copied().unwrap_or(0);
        count as f64 / self.sample_count as f64
    }

    /// Most frequent category and its percentage share of the sample.
    /// Ties resolve to the lexicographically first name so the output is
    /// deterministic.
    pub fn top_category(&self) -> Option<(&str, f64)> {
        let (name, count) = self
            .category_counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1))
            .map(|(name, count)| (name.as_str(), *count))?;
        // max_by keeps the last of equal elements; walk back to the first.
        let (name, count) = self
            .category_counts
            .iter()
            .find(|(_, c)| **c == count)
            .map(|(n, c)| (n.as_str(), *c))
            .unwrap_or((name, count));
        Some((name, count as f64 / self.sample_count as f64 * 100.0))
    }

    /// Most frequent size class, skipping `NotApplicable` unless it is
    /// the only class present.
    pub fn top_size(&self) -> Option<JobSize> {
        let meaningful = self
            .size_counts
            .iter()
            .filter(|(size, _)| **size != JobSize::NotApplicable)
            .max_by_key(|(_, count)| **count)
            .map(|(size, _)| *size);

        meaningful.or_else(|| {
            self.size_counts
                .contains_key(&JobSize::NotApplicable)
                .then_some(JobSize::NotApplicable)
        })
    }

    /// Share of the sample with the given size class, in [0, 1].
    pub fn size_frequency(&self, size: JobSize) -> f64 {
        if self.sample_count == 0 {
            return 0.0;
        }
        let count = self.size_counts.get(&size).copied().unwrap_or(0);
        count as f64 / self.sample_count as f64
    }
}
