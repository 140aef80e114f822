use super::aggregate::PatternSummary;
use super::domain::{
    Classification, CompletionCheck, DetailKeyword, DetailSeverity, JobSize, KnownDetails,
    MissingDetail, PriceFactors, SuggestedQuestion,
};
use super::signals::JobSignals;

/// Everything a facet builder may consult. Facets are independent; each
/// reads from this context and none feeds another.
pub(crate) struct FacetContext<'a> {
    pub(crate) signals: &'a JobSignals,
    pub(crate) known: &'a KnownDetails,
    pub(crate) summary: &'a PatternSummary,
}

const SURFACE_QUESTION_THRESHOLD: f64 = 0.7;
const STOREY_QUESTION_THRESHOLD: f64 = 0.5;
const PROPERTY_QUESTION_THRESHOLD: f64 = 0.5;
const MEASUREMENT_QUESTION_THRESHOLD: f64 = 0.5;

const MISSING_DETAIL_THRESHOLD: f64 = 0.5;
const CRITICAL_THRESHOLD: f64 = 0.8;
const IMPORTANT_THRESHOLD: f64 = 0.6;

const CEILING_FACTOR_THRESHOLD: f64 = 0.6;
const SIZE_SPREAD_THRESHOLD: f64 = 0.3;

struct QuestionRule {
    applies: fn(&FacetContext<'_>) -> bool,
    topic: &'static str,
    question: &'static str,
}

/// Priority-ordered decision table; the first matching rule wins and at
/// most one question comes back per call.
const QUESTION_RULES: [QuestionRule; 6] = [
    QuestionRule {
        applies: |ctx| {
            ctx.summary.detail_frequency(DetailKeyword::Ceilings) > SURFACE_QUESTION_THRESHOLD
                && !ctx.known.covers(DetailKeyword::Ceilings)
        },
        topic: "surfaces",
        question: "Do the ceilings need doing as well?",
    },
    QuestionRule {
        applies: |ctx| {
            ctx.summary.detail_frequency(DetailKeyword::Trims) > SURFACE_QUESTION_THRESHOLD
                && !ctx.known.covers(DetailKeyword::Trims)
        },
        topic: "surfaces",
        question: "Should trims and skirting boards be included?",
    },
    QuestionRule {
        applies: |ctx| {
            ctx.summary.detail_frequency(DetailKeyword::Storeys) > STOREY_QUESTION_THRESHOLD
                && ctx.known.storeys.is_none()
        },
        topic: "storeys",
        question: "Is the property single or double storey?",
    },
    QuestionRule {
        applies: |ctx| {
            ctx.summary.detail_frequency(DetailKeyword::PropertyType) > PROPERTY_QUESTION_THRESHOLD
                && ctx.known.property_type.is_none()
                && ctx.signals.property_type.is_none()
        },
        topic: "property_type",
        question: "What type of property is it?",
    },
    QuestionRule {
        applies: |ctx| ctx.known.size.is_none() && ctx.signals.room_count_proxy().is_none(),
        topic: "rooms",
        question: "How many rooms are you looking to have done?",
    },
    QuestionRule {
        applies: |ctx| {
            ctx.summary.detail_frequency(DetailKeyword::Measurements)
                > MEASUREMENT_QUESTION_THRESHOLD
                && ctx.known.measurements.is_none()
                && !ctx.signals.has_measurements
        },
        topic: "measurements",
        question: "Do you have approximate measurements for the area?",
    },
];

pub(crate) fn next_question(ctx: &FacetContext<'_>) -> Option<SuggestedQuestion> {
    QUESTION_RULES
        .iter()
        .find(|rule| (rule.applies)(ctx))
        .map(|rule| SuggestedQuestion {
            topic: rule.topic,
            question: rule.question,
        })
}

/// Majority-class category prediction; the size class is overridden by
/// an explicit room-count signal (1 room is small, 2-4 is medium).
pub(crate) fn classification(ctx: &FacetContext<'_>) -> Classification {
    let (category, category_confidence_pct) = ctx
        .summary
        .top_category()
        .map(|(name, pct)| (Some(name.to_string()), Some(pct)))
        .unwrap_or((None, None));

    let room_override = ctx.signals.room_count_proxy().and_then(|count| match count {
        1 => Some(JobSize::Small),
        2..=4 => Some(JobSize::Medium),
        _ => None,
    });
    let size_from_room_count = room_override.is_some();
    let size = room_override.or_else(|| ctx.summary.top_size());

    Classification {
        category,
        category_confidence_pct,
        size,
        size_from_room_count,
    }
}

pub(crate) fn missing_details(ctx: &FacetContext<'_>) -> Vec<MissingDetail> {
    let mut details: Vec<MissingDetail> = DetailKeyword::ALL
        .into_iter()
        .filter(|keyword| !ctx.known.covers(*keyword))
        .filter_map(|keyword| {
            let frequency = ctx.summary.detail_frequency(keyword);
            if frequency <= MISSING_DETAIL_THRESHOLD {
                return None;
            }
            let severity = if frequency > CRITICAL_THRESHOLD {
                DetailSeverity::Critical
            } else if frequency > IMPORTANT_THRESHOLD {
                DetailSeverity::Important
            } else {
                DetailSeverity::Useful
            };
            Some(MissingDetail {
                detail: keyword,
                frequency_pct: frequency * 100.0,
                severity,
            })
        })
        .collect();

    details.sort_by(|a, b| b.frequency_pct.total_cmp(&a.frequency_pct));
    details
}

/// Omitted entirely when no sampled job carries a positive price.
pub(crate) fn price_factors(ctx: &FacetContext<'_>) -> Option<PriceFactors> {
    let stats = ctx.summary.price_stats?;

    let mut factors = Vec::new();
    if ctx.summary.detail_frequency(DetailKeyword::Ceilings) > CEILING_FACTOR_THRESHOLD {
        factors.push("Including ceilings typically adds 20-30% to the quote".to_string());
    }
    if ctx.summary.size_frequency(JobSize::Large) > SIZE_SPREAD_THRESHOLD
        && ctx.summary.size_frequency(JobSize::Small) > 0.0
    {
        factors.push("Similar jobs range from small touch-ups to large full-property work, which widens the price spread".to_string());
    }

    Some(PriceFactors {
        minimum: stats.minimum,
        maximum: stats.maximum,
        average: stats.average,
        range: format!("${:.0} - ${:.0}", stats.minimum, stats.maximum),
        factors,
    })
}

const REQUIRED_FIELDS: [&str; 2] = ["category", "size"];
const NICE_TO_HAVE_FIELDS: [&str; 3] = ["property_type", "surfaces", "timing"];

/// Ready iff no required field is missing from the known details or the
/// derived classification.
pub(crate) fn completion_check(ctx: &FacetContext<'_>) -> CompletionCheck {
    let derived = classification(ctx);

    let mut missing_required = Vec::new();
    for field in REQUIRED_FIELDS {
        let covered = match field {
            "category" => ctx.known.category.is_some() || derived.category.is_some(),
            "size" => ctx.known.size.is_some() || derived.size.is_some(),
            _ => false,
        };
        if !covered {
            missing_required.push(field);
        }
    }

    let mut missing_nice_to_have = Vec::new();
    for field in NICE_TO_HAVE_FIELDS {
        let covered = match field {
            "property_type" => {
                ctx.known.property_type.is_some() || ctx.signals.property_type.is_some()
            }
            "surfaces" => !ctx.known.surfaces.is_empty(),
            "timing" => ctx.known.timing.is_some(),
            _ => false,
        };
        if !covered {
            missing_nice_to_have.push(field);
        }
    }

    CompletionCheck {
        ready: missing_required.is_empty(),
        missing_required,
        missing_nice_to_have,
    }
}
