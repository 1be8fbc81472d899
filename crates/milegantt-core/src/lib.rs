//! # milegantt-core
//!
//! Core domain model for milegantt milestone charts.
//!
//! This crate provides:
//! - Domain types: `Milestone`, `MilestoneTable`, `ColumnHeaders`
//! - The gap-filling normalizer (`normalize`)
//! - Day-column layout for spreadsheet Gantt grids (`CalendarGrid`)
//! - The `Renderer` trait and `RenderError`
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use milegantt_core::{Milestone, MilestoneTable};
//!
//! let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
//!
//! let mut table = MilestoneTable::new("Roadmap");
//! table.push(Milestone::new("Kickoff", d(1, 5)).start(d(1, 1)).owner("A").module("X"));
//! table.push(Milestone::new("Design", d(1, 10)).owner("B"));
//!
//! let report = table.normalize();
//! assert_eq!(report.starts_filled, 1);
//! assert_eq!(table.rows[1].start, Some(d(1, 6)));
//! assert_eq!(table.rows[1].module, "X");
//! ```

pub mod calendar;
pub mod normalize;

pub use calendar::{CalendarGrid, HEADER_WIDTH};
pub use normalize::{normalize, FillReport};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Milestone
// ============================================================================

/// A single row of the milestone table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Milestone name, shown as the row label
    pub name: String,
    /// First day of the milestone; `None` until inferred by the normalizer
    pub start: Option<NaiveDate>,
    /// Last day of the milestone (inclusive)
    pub end: NaiveDate,
    /// Responsible party, used as the color key (may be blank)
    pub owner: String,
    /// Grouping label (may be blank, inherits from the row above)
    pub module: String,
}

impl Milestone {
    /// Create a milestone ending on `end` with no start, owner or module
    pub fn new(name: impl Into<String>, end: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start: None,
            end,
            owner: String::new(),
            module: String::new(),
        }
    }

    /// Set the start date
    pub fn start(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    /// Set the owner
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Set the module
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    /// True when the module is empty or whitespace only
    pub fn has_blank_module(&self) -> bool {
        self.module.trim().is_empty()
    }

    /// True when the owner is empty or whitespace only
    pub fn has_blank_owner(&self) -> bool {
        self.owner.trim().is_empty()
    }

    /// True when the start date falls after the end date
    pub fn is_inverted(&self) -> bool {
        self.start.is_some_and(|s| s > self.end)
    }

    /// Inclusive `[start, end]` span, if the start is known and not inverted
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self.start {
            Some(start) if start <= self.end => Some((start, self.end)),
            _ => None,
        }
    }
}

// ============================================================================
// Column Headers
// ============================================================================

/// Header labels of the five data columns, as read from the source file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnHeaders {
    pub milestone: String,
    pub start: String,
    pub end: String,
    pub owner: String,
    pub module: String,
}

impl Default for ColumnHeaders {
    fn default() -> Self {
        Self {
            milestone: "Milestone".into(),
            start: "Start".into(),
            end: "End".into(),
            owner: "Owner".into(),
            module: "Module".into(),
        }
    }
}

impl ColumnHeaders {
    /// Labels in column order
    pub fn labels(&self) -> [&str; HEADER_WIDTH] {
        [
            self.milestone.as_str(),
            self.start.as_str(),
            self.end.as_str(),
            self.owner.as_str(),
            self.module.as_str(),
        ]
    }
}

// ============================================================================
// Milestone Table
// ============================================================================

/// Title used when neither the source nor the configuration names one
pub const DEFAULT_TITLE: &str = "Gantt Chart";

/// Ordered milestone rows; file order is display order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneTable {
    /// Display title for rendered documents
    pub title: String,
    /// Column header labels
    pub headers: ColumnHeaders,
    /// Rows in file order
    pub rows: Vec<Milestone>,
}

impl Default for MilestoneTable {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

impl MilestoneTable {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            headers: ColumnHeaders::default(),
            rows: Vec::new(),
        }
    }

    /// Append a row
    pub fn push(&mut self, milestone: Milestone) {
        self.rows.push(milestone);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fill blank modules and missing starts in place
    pub fn normalize(&mut self) -> FillReport {
        normalize(&mut self.rows)
    }

    /// Earliest known start and latest end across all rows.
    ///
    /// Rows without a start contribute only their end. Returns `None` when no
    /// row has a start date.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.rows.iter().filter_map(|r| r.start).min()?;
        let last = self.rows.iter().map(|r| r.end).max()?;
        Some((first, last.max(first)))
    }

    /// Distinct non-blank owners in first-appearance order
    pub fn owners(&self) -> Vec<&str> {
        distinct(self.rows.iter().map(|r| r.owner.as_str()))
    }

    /// Distinct non-blank modules in first-appearance order
    pub fn modules(&self) -> Vec<&str> {
        distinct(self.rows.iter().map(|r| r.module.as_str()))
    }

    /// Index of the last row belonging to `module`
    pub fn last_row_of(&self, module: &str) -> Option<usize> {
        self.rows.iter().rposition(|r| r.module == module)
    }

    /// Latest end date among rows belonging to `module`
    pub fn module_end(&self, module: &str) -> Option<NaiveDate> {
        self.rows
            .iter()
            .filter(|r| r.module == module)
            .map(|r| r.end)
            .max()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    for value in values {
        if !value.trim().is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

// ============================================================================
// Renderer
// ============================================================================

/// Output backend for a normalized milestone table
pub trait Renderer {
    type Output;

    /// Render the table to the output format
    fn render(&self, table: &MilestoneTable) -> Result<Self::Output, RenderError>;
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn sample_table() -> MilestoneTable {
        let mut table = MilestoneTable::new("Sample");
        table.push(
            Milestone::new("M1", date(2024, 1, 5))
                .start(date(2024, 1, 1))
                .owner("A")
                .module("X"),
        );
        table.push(
            Milestone::new("M2", date(2024, 1, 10))
                .start(date(2024, 1, 6))
                .owner("B")
                .module("X"),
        );
        table.push(
            Milestone::new("M3", date(2024, 1, 15))
                .start(date(2024, 1, 11))
                .owner("A")
                .module("Y"),
        );
        table
    }

    #[test]
    fn milestone_builder() {
        let m = Milestone::new("Kickoff", date(2024, 3, 2))
            .start(date(2024, 3, 1))
            .owner("ops")
            .module("Phase 1");
        assert_eq!(m.name, "Kickoff");
        assert_eq!(m.start, Some(date(2024, 3, 1)));
        assert_eq!(m.owner, "ops");
        assert_eq!(m.module, "Phase 1");
    }

    #[test]
    fn blank_checks_ignore_whitespace() {
        let m = Milestone::new("M", date(2024, 1, 1)).module("  ").owner("\t");
        assert!(m.has_blank_module());
        assert!(m.has_blank_owner());
    }

    #[test]
    fn inverted_span_detected() {
        let m = Milestone::new("M", date(2024, 1, 1)).start(date(2024, 1, 3));
        assert!(m.is_inverted());
        assert_eq!(m.span(), None);

        let ok = Milestone::new("M", date(2024, 1, 3)).start(date(2024, 1, 3));
        assert!(!ok.is_inverted());
        assert_eq!(ok.span(), Some((date(2024, 1, 3), date(2024, 1, 3))));
    }

    #[test]
    fn date_span_uses_min_start_and_max_end() {
        let table = sample_table();
        assert_eq!(
            table.date_span(),
            Some((date(2024, 1, 1), date(2024, 1, 15)))
        );
    }

    #[test]
    fn date_span_skips_missing_starts() {
        let mut table = MilestoneTable::new("t");
        table.push(Milestone::new("M0", date(2024, 1, 3)));
        table.push(Milestone::new("M1", date(2024, 1, 9)).start(date(2024, 1, 4)));
        assert_eq!(table.date_span(), Some((date(2024, 1, 4), date(2024, 1, 9))));
    }

    #[test]
    fn date_span_none_without_starts() {
        let mut table = MilestoneTable::new("t");
        table.push(Milestone::new("M0", date(2024, 1, 3)));
        assert_eq!(table.date_span(), None);
    }

    #[test]
    fn owners_and_modules_in_first_appearance_order() {
        let mut table = sample_table();
        table.push(Milestone::new("M4", date(2024, 1, 20)));
        assert_eq!(table.owners(), vec!["A", "B"]);
        assert_eq!(table.modules(), vec!["X", "Y"]);
    }

    #[test]
    fn module_boundaries() {
        let table = sample_table();
        assert_eq!(table.last_row_of("X"), Some(1));
        assert_eq!(table.last_row_of("Y"), Some(2));
        assert_eq!(table.last_row_of("Z"), None);
        assert_eq!(table.module_end("X"), Some(date(2024, 1, 10)));
    }

    #[test]
    fn default_table_title() {
        let table = MilestoneTable::default();
        assert_eq!(table.title, DEFAULT_TITLE);
        assert!(table.is_empty());
    }

    #[test]
    fn default_headers() {
        let headers = ColumnHeaders::default();
        assert_eq!(
            headers.labels(),
            ["Milestone", "Start", "End", "Owner", "Module"]
        );
    }

    #[test]
    fn render_error_display() {
        let err = RenderError::InvalidData("No milestones to render".into());
        assert_eq!(err.to_string(), "Invalid data: No milestones to render");
    }
}
