use serde::{Deserialize, Serialize};

/// Identifier wrapper for archived jobs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Size classification carried by archived jobs and derived for new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobSize {
    Small,
    Medium,
    Large,
    NotApplicable,
}

impl JobSize {
    pub const fn label(self) -> &'static str {
        match self {
            JobSize::Small => "small",
            JobSize::Medium => "medium",
            JobSize::Large => "large",
            JobSize::NotApplicable => "not_applicable",
        }
    }

    /// Lenient parse used by the CSV importer; unknown values collapse
    /// to `NotApplicable`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "small" | "s" => JobSize::Small,
            "medium" | "m" => JobSize::Medium,
            "large" | "l" => JobSize::Large,
            _ => JobSize::NotApplicable,
        }
    }
}

/// A completed job drawn from the archive. Read-only sample material;
/// never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalJob {
    pub job_id: JobId,
    pub category: String,
    pub subtype: Option<String>,
    pub size: JobSize,
    pub description: Option<String>,
    pub cleaned_description: Option<String>,
    pub price: Option<f64>,
}

impl HistoricalJob {
    /// Text used for keyword aggregation; the cleaned variant wins when
    /// both are present.
    pub fn match_text(&self) -> &str {
        self.cleaned_description
            .as_deref()
            .or(self.description.as_deref())
            .unwrap_or("")
    }
}

/// What the caller already knows about the job being described.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnownDetails {
    pub category: Option<String>,
    pub subtype: Option<String>,
    pub size: Option<JobSize>,
    pub property_type: Option<String>,
    pub surfaces: Vec<String>,
    pub storeys: Option<u8>,
    pub timing: Option<String>,
    pub measurements: Option<String>,
}

impl KnownDetails {
    /// Whether the caller has already covered a detail keyword, so the
    /// analyzer stops asking about it.
    pub fn covers(&self, keyword: DetailKeyword) -> bool {
        match keyword {
            DetailKeyword::Ceilings
            | DetailKeyword::Trims
            | DetailKeyword::Doors
            | DetailKeyword::Walls => self
                .surfaces
                .iter()
                .any(|surface| keyword.matches(surface)),
            DetailKeyword::Measurements => self.measurements.is_some(),
            DetailKeyword::Storeys => self.storeys.is_some(),
            DetailKeyword::PropertyType => self.property_type.is_some(),
        }
    }
}

/// Detail keywords counted over the sample and used to drive questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailKeyword {
    Ceilings,
    Trims,
    Doors,
    Walls,
    Measurements,
    Storeys,
    PropertyType,
}

impl DetailKeyword {
    pub const ALL: [DetailKeyword; 7] = [
        DetailKeyword::Ceilings,
        DetailKeyword::Trims,
        DetailKeyword::Doors,
        DetailKeyword::Walls,
        DetailKeyword::Measurements,
        DetailKeyword::Storeys,
        DetailKeyword::PropertyType,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            DetailKeyword::Ceilings => "ceilings",
            DetailKeyword::Trims => "trims",
            DetailKeyword::Doors => "doors",
            DetailKeyword::Walls => "walls",
            DetailKeyword::Measurements => "measurements",
            DetailKeyword::Storeys => "storeys",
            DetailKeyword::PropertyType => "property_type",
        }
    }

    /// Substring/regex test against a job description.
    pub fn matches(self, text: &str) -> bool {
        super::signals::detail_keyword_present(self, text)
    }
}

/// Independently requestable output sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisFacet {
    NextQuestion,
    Classification,
    MissingDetails,
    PriceFactors,
    CompletionCheck,
}

impl AnalysisFacet {
    /// Facets assembled when the caller does not name any.
    pub fn defaults() -> Vec<AnalysisFacet> {
        vec![AnalysisFacet::NextQuestion, AnalysisFacet::Classification]
    }
}

/// Confidence label derived from the sample size alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn from_sample_count(count: usize) -> Self {
        if count >= 5 {
            Confidence::High
        } else if count >= 3 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// The one question worth asking next, if any rule fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedQuestion {
    pub topic: &'static str,
    pub question: &'static str,
}

/// Category/size prediction derived from the sample and input signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Option<String>,
    /// Share of the sample backing the category, as a percentage.
    pub category_confidence_pct: Option<f64>,
    pub size: Option<JobSize>,
    /// True when the room-count signal overrode the sample majority.
    pub size_from_room_count: bool,
}

/// Severity tiers for details the caller has not covered yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailSeverity {
    Critical,
    Important,
    Useful,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingDetail {
    pub detail: DetailKeyword,
    pub frequency_pct: f64,
    pub severity: DetailSeverity,
}

/// Price statistics plus qualitative factor notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceFactors {
    pub minimum: f64,
    pub maximum: f64,
    pub average: f64,
    pub range: String,
    pub factors: Vec<String>,
}

/// Whether enough is known to quote, and what is still outstanding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionCheck {
    pub ready: bool,
    pub missing_required: Vec<&'static str>,
    pub missing_nice_to_have: Vec<&'static str>,
}

/// Bundle of whichever facets were requested. Sections the caller did
/// not ask for are omitted entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub sample_count: usize,
    pub confidence: Confidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<SuggestedQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_details: Option<Vec<MissingDetail>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_factors: Option<PriceFactors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_check: Option<CompletionCheck>,
}
