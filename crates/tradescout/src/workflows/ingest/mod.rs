//! CSV seeding for the directory and job archive.
//!
//! Directory exports and job-history exports arrive as CSV from the
//! surrounding CRM tooling; this module turns them into domain records
//! so the in-memory stores can be hydrated at startup or from the CLI.

mod parser;

use std::io::Read;
use std::path::Path;

use crate::workflows::analysis::domain::HistoricalJob;
use crate::workflows::matching::domain::TradieProfile;

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: u64, reason: String },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read export: {err}"),
            ImportError::Csv(err) => write!(f, "invalid CSV data: {err}"),
            ImportError::InvalidRow { line, reason } => {
                write!(f, "invalid row at line {line}: {reason}")
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct DirectoryImporter;

impl DirectoryImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<TradieProfile>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<TradieProfile>, ImportError> {
        parser::parse_tradies(reader)
    }
}

pub struct ArchiveImporter;

impl ArchiveImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<HistoricalJob>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<HistoricalJob>, ImportError> {
        parser::parse_jobs(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::analysis::domain::JobSize;
    use std::io::Cursor;

    #[test]
    fn tradie_rows_parse_with_blank_optional_cells() {
        let csv = "Tradie ID,Business Name,Postcode,Suburb,Area,Region,Rating,Jobs Completed,Review Count,Engagement Rate,Rejection Rate,Member Since\n\
t-001,Brush Bros,2210,Peakhurst,St George,Sydney,4.8,120,45,92.5,0.04,2021-03-15\n\
t-002,Roller Co,,,,Sydney,,0,0,,,\n";
        let profiles = DirectoryImporter::from_reader(Cursor::new(csv)).expect("parse tradies");

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].tradie_id.0, "t-001");
        assert_eq!(profiles[0].rating, Some(4.8));
        assert_eq!(profiles[0].rejection_rate, Some(0.04));
        assert!(profiles[0].member_since.is_some());

        assert_eq!(profiles[1].suburb, None);
        assert_eq!(profiles[1].rating, None);
        assert_eq!(profiles[1].member_since, None);
    }

    #[test]
    fn job_rows_parse_sizes_leniently() {
        let csv = "Job ID,Category,Subtype,Size,Description,Cleaned Description,Price\n\
j-001,Painting,Interior,medium,paint 3 bedrooms and hallway,paint bedrooms hallway,2400\n\
j-002,Painting,,unknown,quick fence job,,\n";
        let jobs = ArchiveImporter::from_reader(Cursor::new(csv)).expect("parse jobs");

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].size, JobSize::Medium);
        assert_eq!(jobs[0].price, Some(2400.0));
        assert_eq!(jobs[1].size, JobSize::NotApplicable);
        assert_eq!(jobs[1].subtype, None);
        assert_eq!(jobs[1].price, None);
    }

    #[test]
    fn missing_identifier_fails_the_import() {
        let csv = "Job ID,Category,Size\n,Painting,small\n";
        let error = ArchiveImporter::from_reader(Cursor::new(csv)).expect_err("blank id rejected");
        match error {
            ImportError::InvalidRow { reason, .. } => assert!(reason.contains("Job ID")),
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error =
            DirectoryImporter::from_path("./does-not-exist.csv").expect_err("expected io error");
        match error {
            ImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
