//! Day-per-column layout for spreadsheet Gantt grids
//!
//! The grid starts with [`HEADER_WIDTH`] data columns (milestone, start, end,
//! owner, module) followed by one column per calendar day from the earliest
//! start to the latest end, inclusive. A milestone covers the columns of its
//! start day through its end day.

use chrono::NaiveDate;
use std::ops::RangeInclusive;

use crate::{Milestone, MilestoneTable};

/// Number of fixed data columns before the first day column
pub const HEADER_WIDTH: usize = 5;

/// Column layout of a calendar Gantt grid (0-based column indices)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarGrid {
    /// Date of the first day column
    pub start: NaiveDate,
    /// Date of the last day column (inclusive)
    pub end: NaiveDate,
    /// Number of columns before the first day column
    pub header_width: usize,
}

impl CalendarGrid {
    /// Grid covering `[start, end]`; an inverted range collapses to one day
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end: end.max(start),
            header_width: HEADER_WIDTH,
        }
    }

    /// Grid spanning the table's earliest start to its latest end
    pub fn for_table(table: &MilestoneTable) -> Option<Self> {
        table
            .date_span()
            .map(|(start, end)| Self::new(start, end))
    }

    /// Override the number of leading data columns
    pub fn header_width(mut self, width: usize) -> Self {
        self.header_width = width;
        self
    }

    /// Number of day columns
    pub fn day_count(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Total number of columns including the header columns
    pub fn column_count(&self) -> usize {
        self.header_width + self.day_count()
    }

    /// Dates of the day columns, in column order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.day_count())
    }

    /// Column index of a date, or `None` outside the grid
    pub fn column_of(&self, date: NaiveDate) -> Option<usize> {
        if date < self.start || date > self.end {
            return None;
        }
        Some((date - self.start).num_days() as usize + self.header_width)
    }

    /// Columns painted for a milestone.
    ///
    /// `None` when the start is unknown or after the end; those rows get no
    /// bar. Dates outside the grid are clamped to its edges.
    pub fn fill_range(&self, milestone: &Milestone) -> Option<RangeInclusive<usize>> {
        let (start, end) = milestone.span()?;
        if end < self.start || start > self.end {
            return None;
        }
        let first = self.column_of(start.max(self.start))?;
        let last = self.column_of(end.min(self.end))?;
        Some(first..=last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn day_count_is_inclusive() {
        let grid = CalendarGrid::new(date(2024, 1, 1), date(2024, 1, 15));
        assert_eq!(grid.day_count(), 15);
        assert_eq!(grid.column_count(), 20);
    }

    #[test]
    fn single_day_grid() {
        let grid = CalendarGrid::new(date(2024, 1, 1), date(2024, 1, 1));
        assert_eq!(grid.day_count(), 1);
        assert_eq!(grid.days().collect::<Vec<_>>(), vec![date(2024, 1, 1)]);
    }

    #[test]
    fn inverted_range_collapses() {
        let grid = CalendarGrid::new(date(2024, 1, 5), date(2024, 1, 1));
        assert_eq!(grid.end, date(2024, 1, 5));
        assert_eq!(grid.day_count(), 1);
    }

    #[test]
    fn days_cross_month_and_leap_day() {
        let grid = CalendarGrid::new(date(2024, 2, 27), date(2024, 3, 2));
        let days: Vec<NaiveDate> = grid.days().collect();
        assert_eq!(
            days,
            vec![
                date(2024, 2, 27),
                date(2024, 2, 28),
                date(2024, 2, 29),
                date(2024, 3, 1),
                date(2024, 3, 2),
            ]
        );
    }

    #[test]
    fn fill_range_offsets_past_header() {
        let grid = CalendarGrid::new(date(2024, 1, 10), date(2024, 1, 20));
        let m = Milestone::new("M", date(2024, 1, 12)).start(date(2024, 1, 10));
        assert_eq!(grid.fill_range(&m), Some(HEADER_WIDTH..=HEADER_WIDTH + 2));
    }

    #[test]
    fn fill_range_single_day() {
        let grid = CalendarGrid::new(date(2024, 1, 1), date(2024, 1, 31));
        let m = Milestone::new("M", date(2024, 1, 31)).start(date(2024, 1, 31));
        assert_eq!(grid.fill_range(&m), Some(35..=35));
    }

    #[test]
    fn fill_range_skips_inverted_and_unstarted_rows() {
        let grid = CalendarGrid::new(date(2024, 1, 1), date(2024, 1, 31));
        let inverted = Milestone::new("M", date(2024, 1, 2)).start(date(2024, 1, 9));
        let unstarted = Milestone::new("M", date(2024, 1, 2));
        assert_eq!(grid.fill_range(&inverted), None);
        assert_eq!(grid.fill_range(&unstarted), None);
    }

    #[test]
    fn fill_range_clamps_to_grid() {
        let grid = CalendarGrid::new(date(2024, 1, 10), date(2024, 1, 20));
        let m = Milestone::new("M", date(2024, 1, 25)).start(date(2024, 1, 5));
        assert_eq!(grid.fill_range(&m), Some(5..=15));

        let outside = Milestone::new("M", date(2024, 2, 5)).start(date(2024, 2, 1));
        assert_eq!(grid.fill_range(&outside), None);
    }

    #[test]
    fn column_of_bounds() {
        let grid = CalendarGrid::new(date(2024, 1, 1), date(2024, 1, 3)).header_width(2);
        assert_eq!(grid.column_of(date(2023, 12, 31)), None);
        assert_eq!(grid.column_of(date(2024, 1, 1)), Some(2));
        assert_eq!(grid.column_of(date(2024, 1, 3)), Some(4));
        assert_eq!(grid.column_of(date(2024, 1, 4)), None);
    }

    #[test]
    fn grid_for_table() {
        let mut table = MilestoneTable::new("t");
        table.push(Milestone::new("M1", date(2024, 1, 5)).start(date(2024, 1, 1)));
        table.push(Milestone::new("M2", date(2024, 1, 15)).start(date(2024, 1, 11)));
        let grid = CalendarGrid::for_table(&table).unwrap();
        assert_eq!(grid.start, date(2024, 1, 1));
        assert_eq!(grid.end, date(2024, 1, 15));
        assert_eq!(grid.day_count(), 15);
    }

    #[test]
    fn grid_for_empty_table() {
        assert_eq!(CalendarGrid::for_table(&MilestoneTable::new("t")), None);
    }
}
