use crate::infra::{InMemoryJobArchive, InMemoryTradieDirectory};
use chrono::Local;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tradescout::error::AppError;
use tradescout::workflows::analysis::{
    AnalysisError, AnalysisFacet, AnalysisRequest, AnalysisResult, JobAnalyzer,
};
use tradescout::workflows::documents::{DocumentKind, DocumentStore, StaticDocumentLibrary};
use tradescout::workflows::ingest::{ArchiveImporter, DirectoryImporter};
use tradescout::workflows::matching::{
    LocationFilters, MatchRanker, RankRequest, ScoredTradie, WeightPreferences,
};

#[derive(Args, Debug, Default)]
pub(crate) struct RankArgs {
    /// Filter candidates to an exact suburb
    #[arg(long)]
    pub(crate) suburb: Option<String>,
    /// Filter candidates to an exact postcode
    #[arg(long)]
    pub(crate) postcode: Option<String>,
    /// Filter candidates to an exact area
    #[arg(long)]
    pub(crate) area: Option<String>,
    /// Filter candidates to an exact region
    #[arg(long)]
    pub(crate) region: Option<String>,
    /// Maximum number of results (clamped to 1..=10, default 5)
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Importance weight for the quality sub-score
    #[arg(long)]
    pub(crate) quality: Option<f64>,
    /// Importance weight for the reliability sub-score
    #[arg(long)]
    pub(crate) reliability: Option<f64>,
    /// Importance weight for the value sub-score
    #[arg(long)]
    pub(crate) value: Option<f64>,
    /// Rank against a CSV directory export instead of the seed data
    #[arg(long)]
    pub(crate) tradies_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Job description fed to the analysis portion of the demo
    #[arg(long)]
    pub(crate) description: Option<String>,
    /// Hydrate the tradie directory from a CSV export
    #[arg(long)]
    pub(crate) tradies_csv: Option<PathBuf>,
    /// Hydrate the job archive from a CSV export
    #[arg(long)]
    pub(crate) jobs_csv: Option<PathBuf>,
    /// Skip the job-analysis portion of the demo
    #[arg(long)]
    pub(crate) skip_analysis: bool,
}

fn load_directory(path: Option<PathBuf>) -> Result<InMemoryTradieDirectory, AppError> {
    match path {
        Some(path) => {
            let profiles = DirectoryImporter::from_path(path)?;
            Ok(InMemoryTradieDirectory::new(profiles))
        }
        None => Ok(InMemoryTradieDirectory::seeded()),
    }
}

fn load_archive(path: Option<PathBuf>) -> Result<InMemoryJobArchive, AppError> {
    match path {
        Some(path) => {
            let jobs = ArchiveImporter::from_path(path)?;
            Ok(InMemoryJobArchive::new(jobs))
        }
        None => Ok(InMemoryJobArchive::seeded()),
    }
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        suburb,
        postcode,
        area,
        region,
        limit,
        quality,
        reliability,
        value,
        tradies_csv,
    } = args;

    let directory = load_directory(tradies_csv)?;
    let ranker = MatchRanker::new(Arc::new(directory));

    let request = RankRequest {
        filters: LocationFilters {
            postcode,
            suburb,
            area,
            region,
        },
        limit,
        weights: WeightPreferences {
            quality,
            reliability,
            value,
        },
    };

    let results = match ranker.rank(&request) {
        Ok(results) => results,
        Err(err) => {
            println!("Ranking unavailable: {err}");
            return Ok(());
        }
    };

    render_rank_results(&results);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        description,
        tradies_csv,
        jobs_csv,
        skip_analysis,
    } = args;

    println!("TradeScout demo ({})", Local::now().date_naive());

    println!("\nRanked search: painters around Peakhurst, quality-weighted");
    let directory = load_directory(tradies_csv)?;
    let ranker = MatchRanker::new(Arc::new(directory));
    let request = RankRequest {
        filters: LocationFilters {
            region: Some("Sydney".to_string()),
            ..LocationFilters::default()
        },
        limit: Some(5),
        weights: WeightPreferences {
            quality: Some(0.6),
            reliability: Some(0.25),
            value: Some(0.15),
        },
    };
    match ranker.rank(&request) {
        Ok(results) => render_rank_results(&results),
        Err(err) => println!("Ranking unavailable: {err}"),
    }

    if skip_analysis {
        return Ok(());
    }

    let description = description
        .unwrap_or_else(|| "paint my 2 bedrooms and the hallway, ceilings included".to_string());
    println!("\nJob analysis: \"{description}\"");

    let archive = load_archive(jobs_csv)?;
    let analyzer = JobAnalyzer::new(Arc::new(archive));
    let request = AnalysisRequest {
        description,
        known_details: Default::default(),
        facets: vec![
            AnalysisFacet::NextQuestion,
            AnalysisFacet::Classification,
            AnalysisFacet::MissingDetails,
            AnalysisFacet::PriceFactors,
            AnalysisFacet::CompletionCheck,
        ],
        sample_size: None,
    };
    match analyzer.analyze(&request) {
        Ok(result) => render_analysis(&result),
        Err(err @ AnalysisError::DescriptionTooShort { .. }) => {
            println!("Analysis rejected: {err}")
        }
        Err(AnalysisError::Store(err)) => println!("Analysis unavailable: {err}"),
    }

    println!("\nReference material: painting checklist");
    let library = StaticDocumentLibrary::builtin();
    match library.read_document("painting", DocumentKind::Checklist) {
        Ok(body) => println!("- {body}"),
        Err(err) => println!("- unavailable: {err}"),
    }

    Ok(())
}

fn render_rank_results(results: &[ScoredTradie]) {
    if results.is_empty() {
        println!("No matching tradies found");
        return;
    }

    println!(
        "Weights: quality {:.2} | reliability {:.2} | value {:.2}",
        results[0].weights.quality, results[0].weights.reliability, results[0].weights.value
    );
    for (position, entry) in results.iter().enumerate() {
        let location = entry
            .profile
            .suburb
            .as_deref()
            .or(entry.profile.region.as_deref())
            .unwrap_or("unknown location");
        let rating = match entry.profile.rating {
            Some(rating) => format!("{rating:.1} stars"),
            None => "unrated".to_string(),
        };
        println!(
            "{}. {} ({}) | score {:.3} | {} | {} reviews | {} jobs",
            position + 1,
            entry.profile.business_name,
            location,
            entry.score,
            rating,
            entry.profile.review_count,
            entry.profile.jobs_completed
        );
    }
}

fn render_analysis(result: &AnalysisResult) {
    println!(
        "Sample: {} similar jobs | confidence {:?}",
        result.sample_count, result.confidence
    );

    if let Some(question) = &result.next_question {
        println!("Next question [{}]: {}", question.topic, question.question);
    } else {
        println!("Next question: nothing left to ask");
    }

    if let Some(classification) = &result.classification {
        let category = classification.category.as_deref().unwrap_or("unknown");
        let size = classification
            .size
            .map(|size| size.label())
            .unwrap_or("unknown");
        let origin = if classification.size_from_room_count {
            "from room count"
        } else {
            "from sample majority"
        };
        match classification.category_confidence_pct {
            Some(pct) => println!("Classification: {category} ({pct:.0}% of sample), size {size} ({origin})"),
            None => println!("Classification: {category}, size {size} ({origin})"),
        }
    }

    if let Some(missing) = &result.missing_details {
        if missing.is_empty() {
            println!("Missing details: none");
        } else {
            println!("Missing details:");
            for detail in missing {
                println!(
                    "- {} ({:?}, mentioned in {:.0}% of similar jobs)",
                    detail.detail.label(),
                    detail.severity,
                    detail.frequency_pct
                );
            }
        }
    }

    if let Some(prices) = &result.price_factors {
        println!(
            "Price guidance: {} (avg ${:.0} over priced sample)",
            prices.range, prices.average
        );
        for factor in &prices.factors {
            println!("- {factor}");
        }
    }

    if let Some(check) = &result.completion_check {
        if check.ready {
            println!("Completion: ready to quote");
        } else {
            println!(
                "Completion: not ready (required: {}; nice to have: {})",
                check.missing_required.join(", "),
                check.missing_nice_to_have.join(", ")
            );
        }
    }
}
