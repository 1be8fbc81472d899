//! # milegantt-parser
//!
//! Loader for milestone tables stored as CSV.
//!
//! The expected columns are milestone, start date, end date, owner and
//! module. Dates use the compact `YYYYMMDD` form; a blank start date is
//! allowed (the normalizer infers it later), a blank end date is not.
//!
//! Columns are matched by header name, English or Chinese
//! labels (`关键里程碑, 开始时间, 结束时间, 负责人, 模块`). A header row that
//! matches none of the known names is read positionally.
//!
//! ## Example
//!
//! ```rust
//! use milegantt_parser::parse_csv;
//!
//! let input = "milestone,start,end,owner,module\n\
//!              Kickoff,20240101,20240105,A,Setup\n\
//!              Design,,20240110,B,\n";
//!
//! let mut table = parse_csv(input).unwrap();
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.rows[1].start, None);
//!
//! table.normalize();
//! assert_eq!(table.rows[1].module, "Setup");
//! ```

mod table;

use chrono::NaiveDate;
use milegantt_core::MilestoneTable;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Loading error
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error at line {line}: {message}")]
    Csv { line: u64, message: String },

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Invalid date at line {line}, column '{column}': {value:?} (expected YYYYMMDD)")]
    InvalidDate {
        line: u64,
        column: String,
        value: String,
    },

    #[error("Missing end date at line {line}")]
    MissingEndDate { line: u64 },
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map_or(0, csv::Position::line);
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io) => Self::Io(io),
            _ => Self::Csv { line, message },
        }
    }
}

/// Parse a milestone table from CSV text
pub fn parse_csv(input: &str) -> Result<MilestoneTable, LoadError> {
    parse_reader(input.as_bytes())
}

/// Parse a milestone table from any CSV byte source
pub fn parse_reader<R: Read>(reader: R) -> Result<MilestoneTable, LoadError> {
    table::read_table(reader)
}

/// Parse a milestone table from a CSV file
pub fn parse_file(path: &Path) -> Result<MilestoneTable, LoadError> {
    let file = std::fs::File::open(path)?;
    let table = parse_reader(std::io::BufReader::new(file))?;
    debug!(path = %path.display(), rows = table.len(), "loaded milestone table");
    Ok(table)
}

/// A date field that is not a valid `YYYYMMDD` calendar date
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date {value:?} (expected YYYYMMDD)")]
pub struct DateFormatError {
    /// The offending field, trimmed
    pub value: String,
}

impl DateFormatError {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}

/// Parse a compact `YYYYMMDD` date; blank input yields `None`
pub fn parse_compact_date(value: &str) -> Result<Option<NaiveDate>, DateFormatError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateFormatError::new(value));
    }

    let year: i32 = value[0..4].parse().map_err(|_| DateFormatError::new(value))?;
    let month: u32 = value[4..6].parse().map_err(|_| DateFormatError::new(value))?;
    let day: u32 = value[6..8].parse().map_err(|_| DateFormatError::new(value))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .map(Some)
        .ok_or_else(|| DateFormatError::new(value))
}
