use std::io::Read;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::ImportError;
use crate::workflows::analysis::domain::{HistoricalJob, JobId, JobSize};
use crate::workflows::matching::domain::{TradieId, TradieProfile};

pub(crate) fn parse_tradies<R: Read>(reader: R) -> Result<Vec<TradieProfile>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut profiles = Vec::new();

    for (index, record) in csv_reader.deserialize::<TradieRow>().enumerate() {
        let row = record?;
        profiles.push(row.into_profile(data_line(index))?);
    }

    Ok(profiles)
}

pub(crate) fn parse_jobs<R: Read>(reader: R) -> Result<Vec<HistoricalJob>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut jobs = Vec::new();

    for (index, record) in csv_reader.deserialize::<JobRow>().enumerate() {
        let row = record?;
        jobs.push(row.into_job(data_line(index))?);
    }

    Ok(jobs)
}

// First data row sits on line 2, under the header.
fn data_line(index: usize) -> u64 {
    index as u64 + 2
}

#[derive(Debug, Deserialize)]
struct TradieRow {
    #[serde(rename = "Tradie ID")]
    tradie_id: String,
    #[serde(rename = "Business Name")]
    business_name: String,
    #[serde(rename = "Postcode", default, deserialize_with = "blank_as_none")]
    postcode: Option<String>,
    #[serde(rename = "Suburb", default, deserialize_with = "blank_as_none")]
    suburb: Option<String>,
    #[serde(rename = "Area", default, deserialize_with = "blank_as_none")]
    area: Option<String>,
    #[serde(rename = "Region", default, deserialize_with = "blank_as_none")]
    region: Option<String>,
    #[serde(rename = "Rating", default, deserialize_with = "blank_as_none")]
    rating: Option<String>,
    #[serde(rename = "Jobs Completed", default)]
    jobs_completed: Option<u32>,
    #[serde(rename = "Review Count", default)]
    review_count: Option<u32>,
    #[serde(rename = "Engagement Rate", default, deserialize_with = "blank_as_none")]
    engagement_rate: Option<String>,
    #[serde(rename = "Rejection Rate", default, deserialize_with = "blank_as_none")]
    rejection_rate: Option<String>,
    #[serde(rename = "Member Since", default, deserialize_with = "blank_as_none")]
    member_since: Option<String>,
}

impl TradieRow {
    fn into_profile(self, line: u64) -> Result<TradieProfile, ImportError> {
        if self.tradie_id.is_empty() {
            return Err(ImportError::InvalidRow {
                line,
                reason: "Tradie ID is required".to_string(),
            });
        }

        Ok(TradieProfile {
            tradie_id: TradieId(self.tradie_id),
            business_name: self.business_name,
            postcode: self.postcode,
            suburb: self.suburb,
            area: self.area,
            region: self.region,
            rating: parse_numeric(self.rating.as_deref()),
            jobs_completed: self.jobs_completed.unwrap_or(0),
            review_count: self.review_count.unwrap_or(0),
            engagement_rate_pct: parse_numeric(self.engagement_rate.as_deref()),
            rejection_rate: parse_numeric(self.rejection_rate.as_deref()),
            member_since: self.member_since.as_deref().and_then(parse_date),
        })
    }
}

#[derive(Debug, Deserialize)]
struct JobRow {
    #[serde(rename = "Job ID")]
    job_id: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Subtype", default, deserialize_with = "blank_as_none")]
    subtype: Option<String>,
    #[serde(rename = "Size", default, deserialize_with = "blank_as_none")]
    size: Option<String>,
    #[serde(rename = "Description", default, deserialize_with = "blank_as_none")]
    description: Option<String>,
    #[serde(
        rename = "Cleaned Description",
        default,
        deserialize_with = "blank_as_none"
    )]
    cleaned_description: Option<String>,
    #[serde(rename = "Price", default, deserialize_with = "blank_as_none")]
    price: Option<String>,
}

impl JobRow {
    fn into_job(self, line: u64) -> Result<HistoricalJob, ImportError> {
        if self.job_id.is_empty() {
            return Err(ImportError::InvalidRow {
                line,
                reason: "Job ID is required".to_string(),
            });
        }

        Ok(HistoricalJob {
            job_id: JobId(self.job_id),
            category: self.category,
            subtype: self.subtype,
            size: self
                .size
                .as_deref()
                .map(JobSize::parse_lenient)
                .unwrap_or(JobSize::NotApplicable),
            description: self.description,
            cleaned_description: self.cleaned_description,
            price: parse_numeric(self.price.as_deref()),
        })
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_numeric(value: Option<&str>) -> Option<f64> {
    value.and_then(|raw| raw.trim().parse::<f64>().ok())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
