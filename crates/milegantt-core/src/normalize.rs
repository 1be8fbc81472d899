//! Gap filling for loaded milestone rows
//!
//! Two independent single-pass scans over the rows in file order:
//!
//! - **Module forward-fill**: a blank module takes the value of the nearest
//!   non-blank module above it. Leading blanks stay blank.
//! - **Start inference**: a missing start on row `i >= 1` becomes
//!   `rows[i - 1].end + 1 day`. Row 0 is never filled.
//!
//! Filled values are no longer blank, so running the pass twice is a no-op.

use chrono::Days;
use tracing::debug;

use crate::Milestone;

/// Counts of values written by [`normalize`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Rows whose blank module was carried forward
    pub modules_filled: usize,
    /// Rows whose missing start was inferred from the previous row
    pub starts_filled: usize,
}

impl FillReport {
    /// True when nothing was changed
    pub fn is_noop(&self) -> bool {
        self.modules_filled == 0 && self.starts_filled == 0
    }
}

/// Fill blank modules and missing start dates in place
pub fn normalize(rows: &mut [Milestone]) -> FillReport {
    let report = FillReport {
        modules_filled: fill_modules(rows),
        starts_filled: fill_starts(rows),
    };
    debug!(
        rows = rows.len(),
        modules_filled = report.modules_filled,
        starts_filled = report.starts_filled,
        "normalized milestone rows"
    );
    report
}

fn fill_modules(rows: &mut [Milestone]) -> usize {
    let mut carried: Option<String> = None;
    let mut filled = 0;

    for row in rows.iter_mut() {
        if row.has_blank_module() {
            if let Some(module) = &carried {
                row.module.clone_from(module);
                filled += 1;
            }
        } else {
            carried = Some(row.module.clone());
        }
    }

    filled
}

fn fill_starts(rows: &mut [Milestone]) -> usize {
    let mut filled = 0;

    for i in 1..rows.len() {
        if rows[i].start.is_some() {
            continue;
        }
        // Saturates at the calendar maximum instead of overflowing
        let previous_end = rows[i - 1].end;
        rows[i].start = Some(previous_end.checked_add_days(Days::new(1)).unwrap_or(previous_end));
        filled += 1;
    }

    filled
}
