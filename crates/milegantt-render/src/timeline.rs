//! Timeline chart layout
//!
//! Pure layout decisions for the interactive timeline, independent of the
//! output markup:
//!
//! - owner colors, assigned from a palette in first-appearance order and
//!   cycling when owners outnumber palette entries
//! - month ticks with compressed labels (`2024-01`, `02`, `03`, ...)
//! - module markers: the date a module ends and the row it ends on
//! - one bar slot per row, in input order

use chrono::{Datelike, Days, Months, NaiveDate};
use milegantt_core::{MilestoneTable, RenderError};

/// Plotly's default qualitative palette
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// Color used for rows with a blank owner
pub const FALLBACK_COLOR: &str = "#B0B0B0";

// ============================================================================
// Owner colors
// ============================================================================

/// Owner → color assignment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnerColors {
    entries: Vec<(String, String)>,
    fallback: String,
}

impl OwnerColors {
    /// Assign palette colors to owners in the given order.
    ///
    /// An empty palette assigns the fallback to everyone.
    pub fn assign<'a>(
        owners: impl IntoIterator<Item = &'a str>,
        palette: &[String],
        fallback: impl Into<String>,
    ) -> Self {
        let fallback = fallback.into();
        let entries = owners
            .into_iter()
            .enumerate()
            .map(|(i, owner)| {
                let color = if palette.is_empty() {
                    fallback.clone()
                } else {
                    palette[i % palette.len()].clone()
                };
                (owner.to_string(), color)
            })
            .collect();
        Self { entries, fallback }
    }

    /// Color for an owner; unknown and blank owners get the fallback
    pub fn color_of(&self, owner: &str) -> &str {
        self.entries
            .iter()
            .find(|(name, _)| name == owner)
            .map_or(self.fallback.as_str(), |(_, color)| color.as_str())
    }

    /// `(owner, color)` pairs in assignment order
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }
}

// ============================================================================
// Month ticks
// ============================================================================

/// First day of every month within `[start, end]`
pub fn month_ticks(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let Some(mut tick) = start.with_day(1) else {
        return Vec::new();
    };
    if tick < start {
        tick = match tick.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => return Vec::new(),
        };
    }

    let mut ticks = Vec::new();
    while tick <= end {
        ticks.push(tick);
        match tick.checked_add_months(Months::new(1)) {
            Some(next) => tick = next,
            None => break,
        }
    }
    ticks
}

/// Axis labels: `YYYY-MM` on the first tick, every January and every year
/// change, `MM` otherwise
pub fn tick_labels(ticks: &[NaiveDate]) -> Vec<String> {
    let mut previous_year: Option<i32> = None;
    ticks
        .iter()
        .enumerate()
        .map(|(i, tick)| {
            if i == 0 || tick.month() == 1 || previous_year != Some(tick.year()) {
                previous_year = Some(tick.year());
                tick.format("%Y-%m").to_string()
            } else {
                tick.format("%m").to_string()
            }
        })
        .collect()
}

// ============================================================================
// Layout
// ============================================================================

/// One row slot of the timeline
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarSlot {
    /// Row index, top to bottom
    pub row: usize,
    /// Row label
    pub label: String,
    /// Bar extent; `None` when the start is unknown or after the end
    pub span: Option<(NaiveDate, NaiveDate)>,
    /// Fill color
    pub color: String,
}

/// Where a module ends
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleMarker {
    /// Module name, possibly multi-line
    pub name: String,
    /// Latest end date among the module's rows (vertical divider)
    pub end: NaiveDate,
    /// Index of the module's last row (horizontal divider below it)
    pub last_row: usize,
}

/// Resolved timeline layout for a table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimelineLayout {
    /// Visible date range of the time axis
    pub range: (NaiveDate, NaiveDate),
    /// One slot per row, in input order
    pub slots: Vec<BarSlot>,
    /// Month ticks with their labels
    pub ticks: Vec<(NaiveDate, String)>,
    /// Module markers in first-appearance order
    pub modules: Vec<ModuleMarker>,
    /// Owner colors for the legend
    pub owners: OwnerColors,
}

impl TimelineLayout {
    /// Lay out a normalized table
    pub fn build(
        table: &MilestoneTable,
        palette: &[String],
        fallback: &str,
    ) -> Result<Self, RenderError> {
        if table.is_empty() {
            return Err(RenderError::InvalidData("No milestones to render".into()));
        }
        let (first, last) = table
            .date_span()
            .ok_or_else(|| RenderError::InvalidData("No milestone has a start date".into()))?;

        let owners = OwnerColors::assign(table.owners(), palette, fallback);

        let slots = table
            .rows
            .iter()
            .enumerate()
            .map(|(row, milestone)| BarSlot {
                row,
                label: milestone.name.clone(),
                span: milestone.span(),
                color: owners.color_of(&milestone.owner).to_string(),
            })
            .collect();

        let tick_dates = month_ticks(first, last);
        let ticks = tick_dates
            .iter()
            .copied()
            .zip(tick_labels(&tick_dates))
            .collect();

        let modules = table
            .modules()
            .into_iter()
            .filter_map(|module| {
                Some(ModuleMarker {
                    name: module.to_string(),
                    end: table.module_end(module)?,
                    last_row: table.last_row_of(module)?,
                })
            })
            .collect();

        let range = (
            first.checked_sub_days(Days::new(1)).unwrap_or(first),
            last.checked_add_days(Days::new(1)).unwrap_or(last),
        );

        Ok(Self {
            range,
            slots,
            ticks,
            modules,
            owners,
        })
    }

    /// Number of faint row gridlines: one per row slot
    pub fn gridline_count(&self) -> usize {
        self.slots.len()
    }

    /// Row indices that get a module divider below them, ascending
    pub fn divider_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self.modules.iter().map(|m| m.last_row).collect();
        rows.sort_unstable();
        rows.dedup();
        rows
    }
}
