//! Spreadsheet Gantt renderer
//!
//! Generates an XLSX workbook with a single "Gantt Chart" sheet:
//!
//! ```text
//! | Milestone | Start      | End        | Owner | Module | 2024-01-01 | 2024-01-02 | ...
//! |-----------|------------|------------|-------|--------|------------|------------| ...
//! | Kickoff   | 2024-01-01 | 2024-01-02 | 工艺  | Setup  | ██████████ | ██████████ |
//! | Design    | 2024-01-03 | 2024-01-05 | 算法  | Setup  |            |            | ███
//! ```
//!
//! The five data columns are followed by one column per calendar day from
//! the earliest start to the latest end. Each row paints the day cells from
//! its start through its end (inclusive) with the owner's fill color. Rows
//! whose start is unknown or after their end get no bar.

use milegantt_core::{CalendarGrid, MilestoneTable, RenderError, Renderer};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use tracing::{debug, warn};

/// Largest column index an XLSX worksheet accepts (XFD)
const MAX_COLUMN: usize = 16_383;

/// Default owner fill colors
const DEFAULT_OWNER_COLORS: [(&str, u32); 4] = [
    ("工艺", 0xFFC7CE), // red
    ("数采", 0xFFEB9C), // yellow
    ("算法", 0xC6EFCE), // green
    ("电控", 0xD9EAD3), // pale green
];

/// Spreadsheet Gantt chart renderer
#[derive(Clone, Debug)]
pub struct ExcelGanttRenderer {
    /// Worksheet name
    pub sheet_name: String,
    /// Fill color per owner (0xRRGGBB)
    pub owner_colors: BTreeMap<String, u32>,
    /// Fill color for owners missing from `owner_colors`
    pub default_color: u32,
    /// Width of each day column in character units
    pub day_column_width: f64,
    /// Freeze the header row and the data columns
    pub freeze_panes: bool,
}

impl Default for ExcelGanttRenderer {
    fn default() -> Self {
        Self {
            sheet_name: "Gantt Chart".into(),
            owner_colors: DEFAULT_OWNER_COLORS
                .iter()
                .map(|(owner, color)| ((*owner).to_string(), *color))
                .collect(),
            default_color: 0xFFFFFF,
            day_column_width: 4.0,
            freeze_panes: true,
        }
    }
}

impl ExcelGanttRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worksheet name
    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Set or replace one owner's fill color
    pub fn owner_color(mut self, owner: impl Into<String>, rgb: u32) -> Self {
        self.owner_colors.insert(owner.into(), rgb);
        self
    }

    /// Replace the whole owner color table
    pub fn owner_colors(mut self, colors: impl IntoIterator<Item = (String, u32)>) -> Self {
        self.owner_colors = colors.into_iter().collect();
        self
    }

    /// Set the fill color for unmapped owners
    pub fn default_color(mut self, rgb: u32) -> Self {
        self.default_color = rgb;
        self
    }

    /// Set the width of day columns
    pub fn day_column_width(mut self, width: f64) -> Self {
        self.day_column_width = width;
        self
    }

    /// Do not freeze panes
    pub fn no_freeze(mut self) -> Self {
        self.freeze_panes = false;
        self
    }

    /// Fill color for an owner
    pub fn color_for(&self, owner: &str) -> u32 {
        self.owner_colors
            .get(owner)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Compute header labels and painted cell ranges without writing a workbook
    pub fn plan(&self, table: &MilestoneTable) -> Result<SheetPlan, RenderError> {
        if table.is_empty() {
            return Err(RenderError::InvalidData("No milestones to render".into()));
        }
        let grid = CalendarGrid::for_table(table)
            .ok_or_else(|| RenderError::InvalidData("No milestone has a start date".into()))?;

        let last_column = grid.column_count() - 1;
        if last_column > MAX_COLUMN {
            return Err(RenderError::InvalidData(format!(
                "Date span of {} days does not fit in a worksheet",
                grid.day_count()
            )));
        }

        let mut header: Vec<String> = table
            .headers
            .labels()
            .iter()
            .map(|label| (*label).to_string())
            .collect();
        header.extend(grid.days().map(|day| day.format("%Y-%m-%d").to_string()));

        let mut fills = Vec::new();
        for (index, milestone) in table.rows.iter().enumerate() {
            if milestone.is_inverted() {
                warn!(
                    row = index,
                    milestone = %milestone.name,
                    "start date is after end date, no bar painted"
                );
                continue;
            }
            if let Some(columns) = grid.fill_range(milestone) {
                fills.push(CellFill {
                    row: index,
                    columns,
                    color: self.color_for(&milestone.owner),
                });
            }
        }

        debug!(
            rows = table.len(),
            days = grid.day_count(),
            bars = fills.len(),
            "planned gantt sheet"
        );

        Ok(SheetPlan { grid, header, fills })
    }

    /// Generate XLSX workbook bytes
    pub fn render_to_bytes(&self, table: &MilestoneTable) -> Result<Vec<u8>, RenderError> {
        let plan = self.plan(table)?;
        let formats = self.create_formats();

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(&self.sheet_name).map_err(xlsx_error)?;

        self.write_header(sheet, &plan, &formats)?;
        self.write_rows(sheet, table, &formats)?;
        self.paint_bars(sheet, &plan)?;

        if self.freeze_panes {
            sheet
                .set_freeze_panes(1, plan.grid.header_width as u16)
                .map_err(xlsx_error)?;
        }

        workbook.save_to_buffer().map_err(xlsx_error)
    }

    fn create_formats(&self) -> SheetFormats {
        let header = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_border(FormatBorder::Thin);

        let day_header = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_rotation(90)
            .set_border(FormatBorder::Thin);

        let text = Format::new().set_border(FormatBorder::Thin);

        SheetFormats {
            header,
            day_header,
            text,
        }
    }

    fn write_header(
        &self,
        sheet: &mut Worksheet,
        plan: &SheetPlan,
        formats: &SheetFormats,
    ) -> Result<(), RenderError> {
        let header_width = plan.grid.header_width;
        for (col, label) in plan.header.iter().enumerate() {
            let col = col as u16;
            if (col as usize) < header_width {
                sheet
                    .write_with_format(0, col, label.as_str(), &formats.header)
                    .map_err(xlsx_error)?;
                sheet.set_column_width(col, 14).map_err(xlsx_error)?;
            } else {
                sheet
                    .write_with_format(0, col, label.as_str(), &formats.day_header)
                    .map_err(xlsx_error)?;
                sheet
                    .set_column_width(col, self.day_column_width)
                    .map_err(xlsx_error)?;
            }
        }
        sheet.set_column_width(0, 28).map_err(xlsx_error)?;
        Ok(())
    }

    fn write_rows(
        &self,
        sheet: &mut Worksheet,
        table: &MilestoneTable,
        formats: &SheetFormats,
    ) -> Result<(), RenderError> {
        for (index, milestone) in table.rows.iter().enumerate() {
            let row = index as u32 + 1;
            let start = milestone
                .start
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            let end = milestone.end.format("%Y-%m-%d").to_string();

            let cells = [
                milestone.name.as_str(),
                start.as_str(),
                end.as_str(),
                milestone.owner.as_str(),
                milestone.module.as_str(),
            ];
            for (col, value) in cells.iter().enumerate() {
                sheet
                    .write_with_format(row, col as u16, *value, &formats.text)
                    .map_err(xlsx_error)?;
            }
        }
        Ok(())
    }

    fn paint_bars(&self, sheet: &mut Worksheet, plan: &SheetPlan) -> Result<(), RenderError> {
        let mut cache: BTreeMap<u32, Format> = BTreeMap::new();

        for fill in &plan.fills {
            let format = cache.entry(fill.color).or_insert_with(|| bar_format(fill.color));
            let row = fill.row as u32 + 1;
            for col in fill.columns.clone() {
                sheet
                    .write_blank(row, col as u16, format)
                    .map_err(xlsx_error)?;
            }
        }
        Ok(())
    }
}

/// Solid, bold, centered fill used for bar cells
fn bar_format(rgb: u32) -> Format {
    Format::new()
        .set_pattern(FormatPattern::Solid)
        .set_background_color(rgb)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_bold()
}

fn xlsx_error(err: rust_xlsxwriter::XlsxError) -> RenderError {
    RenderError::Format(format!("Failed to create Excel: {err}"))
}

/// Resolved layout of the Gantt sheet
#[derive(Clone, Debug, PartialEq)]
pub struct SheetPlan {
    /// Day-column layout
    pub grid: CalendarGrid,
    /// Header row labels: data columns then one `YYYY-MM-DD` label per day
    pub header: Vec<String>,
    /// Painted bars, one per row that has a valid span
    pub fills: Vec<CellFill>,
}

/// A horizontal run of filled cells
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellFill {
    /// Milestone index (worksheet row is `row + 1`)
    pub row: usize,
    /// 0-based worksheet columns, inclusive
    pub columns: RangeInclusive<usize>,
    /// Fill color (0xRRGGBB)
    pub color: u32,
}

struct SheetFormats {
    header: Format,
    day_header: Format,
    text: Format,
}

impl Renderer for ExcelGanttRenderer {
    type Output = Vec<u8>;

    fn render(&self, table: &MilestoneTable) -> Result<Vec<u8>, RenderError> {
        self.render_to_bytes(table)
    }
}
