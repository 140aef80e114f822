use super::domain::HistoricalJob;

pub const MIN_SAMPLE_SIZE: usize = 5;
pub const MAX_SAMPLE_SIZE: usize = 50;
const DEFAULT_SAMPLE_SIZE: usize = 20;

/// Fewer similar jobs than this triggers the random-sample fallback.
pub const FALLBACK_THRESHOLD: usize = 3;

const MIN_TERM_LEN: usize = 4;
const MAX_TERMS: usize = 5;

pub fn clamp_sample_size(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(DEFAULT_SAMPLE_SIZE)
        .clamp(MIN_SAMPLE_SIZE, MAX_SAMPLE_SIZE)
}

/// Up to five distinct content words (length > 3) from the description,
/// lowercased, in order of first appearance.
pub fn search_terms(description: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for token in description.split(|c: char| !c.is_ascii_alphanumeric()) {
        if token.len() < MIN_TERM_LEN {
            continue;
        }
        let lowered = token.to_ascii_lowercase();
        if !terms.contains(&lowered) {
            terms.push(lowered);
        }
        if terms.len() == MAX_TERMS {
            break;
        }
    }
    terms
}

/// Similarity tier for one archived job: a cleaned-description match
/// outranks a raw-description match outranks no match.
fn similarity_tier(job: &HistoricalJob, terms: &[String]) -> u8 {
    let cleaned_hit = job
        .cleaned_description
        .as_deref()
        .map(|text| contains_any(text, terms))
        .unwrap_or(false);
    if cleaned_hit {
        return 2;
    }

    let raw_hit = job
        .description
        .as_deref()
        .map(|text| contains_any(text, terms))
        .unwrap_or(false);
    if raw_hit {
        1
    } else {
        0
    }
}

fn contains_any(text: &str, terms: &[String]) -> bool {
    let lowered = text.to_ascii_lowercase();
    terms.iter().any(|term| lowered.contains(term.as_str()))
}

/// Order fetched jobs by similarity tier (stable, so archive order breaks
/// ties) and keep the top `sample_size`.
pub fn rank_by_similarity(
    mut jobs: Vec<HistoricalJob>,
    terms: &[String],
    sample_size: usize,
) -> Vec<HistoricalJob> {
    jobs.sort_by_key(|job| std::cmp::Reverse(similarity_tier(job, terms)));
    jobs.truncate(sample_size);
    jobs
}

/// Supplement a sparse similarity sample with random jobs, similar-first,
/// deduplicated by job id, capped at `sample_size`.
pub fn merge_with_fallback(
    similar: Vec<HistoricalJob>,
    fallback: Vec<HistoricalJob>,
    sample_size: usize,
) -> Vec<HistoricalJob> {
    let mut merged = similar;
    for job in fallback {
        if merged.len() == sample_size {
            break;
        }
        if merged.iter().all(|existing| existing.job_id != job.job_id) {
            merged.push(job);
        }
    }
    merged
}
