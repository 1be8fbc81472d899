//! Interactive HTML timeline renderer
//!
//! Produces a standalone HTML document with an inline SVG timeline:
//! one bar per milestone in input order, colored by owner, month ticks
//! along the top, and module dividers with name callouts. Hovering a bar
//! shows its details; the zoom buttons scale the chart.

use chrono::NaiveDate;
use milegantt_core::{MilestoneTable, RenderError, Renderer};
use serde::Serialize;
use svg::node::element::{Group, Line, Rectangle, Text};
use svg::Document;
use tracing::debug;

use crate::html_escape;
use crate::timeline::{BarSlot, ModuleMarker, TimelineLayout, DEFAULT_PALETTE, FALLBACK_COLOR};

/// HTML timeline renderer configuration
#[derive(Clone, Debug)]
pub struct HtmlTimelineRenderer {
    /// Width of the time axis area in pixels
    pub chart_width: u32,
    /// Height per milestone row in pixels
    pub row_height: u32,
    /// Width of the label column in pixels
    pub label_width: u32,
    /// Height of the tick header in pixels
    pub header_height: u32,
    /// Padding around the chart
    pub padding: u32,
    /// Owner palette, assigned in first-appearance order
    pub palette: Vec<String>,
    /// Color for rows with a blank owner
    pub fallback_color: String,
    /// Color of the vertical module dividers
    pub divider_color: String,
    /// Time axis title
    pub x_title: String,
    /// Row axis title
    pub y_title: String,
    /// Font family
    pub font_family: String,
    /// Include tooltip and zoom scripts
    pub interactive: bool,
}

impl Default for HtmlTimelineRenderer {
    fn default() -> Self {
        Self {
            chart_width: 900,
            row_height: 28,
            label_width: 220,
            header_height: 50,
            padding: 20,
            palette: DEFAULT_PALETTE.iter().map(|c| (*c).to_string()).collect(),
            fallback_color: FALLBACK_COLOR.into(),
            divider_color: "#FFA07A".into(),
            x_title: "Date".into(),
            y_title: "Milestone".into(),
            font_family: "system-ui, -apple-system, sans-serif".into(),
            interactive: true,
        }
    }
}

impl HtmlTimelineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure chart width
    pub fn chart_width(mut self, width: u32) -> Self {
        self.chart_width = width;
        self
    }

    /// Configure row height
    pub fn row_height(mut self, height: u32) -> Self {
        self.row_height = height;
        self
    }

    /// Replace the owner palette
    pub fn palette<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palette = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Set the time axis title
    pub fn x_title(mut self, title: impl Into<String>) -> Self {
        self.x_title = title.into();
        self
    }

    /// Set the row axis title
    pub fn y_title(mut self, title: impl Into<String>) -> Self {
        self.y_title = title.into();
        self
    }

    /// Disable tooltip and zoom scripts
    pub fn static_chart(mut self) -> Self {
        self.interactive = false;
        self
    }

    fn chart_left(&self) -> f64 {
        f64::from(self.padding + self.label_width)
    }

    fn chart_right(&self) -> f64 {
        self.chart_left() + f64::from(self.chart_width)
    }

    fn chart_top(&self) -> u32 {
        self.padding + self.header_height
    }

    fn row_top(&self, row: usize) -> u32 {
        self.chart_top() + row as u32 * self.row_height
    }

    fn total_width(&self) -> u32 {
        self.padding * 2 + self.label_width + self.chart_width
    }

    fn total_height(&self, rows: usize) -> u32 {
        // room below the chart for the axis title
        self.row_top(rows) + self.padding + 30
    }

    /// Calculate pixels per day for the visible range
    fn pixels_per_day(&self, range: (NaiveDate, NaiveDate)) -> f64 {
        let days = (range.1 - range.0).num_days().max(1) as f64;
        f64::from(self.chart_width) / days
    }

    /// Convert a date to x position
    fn date_to_x(&self, date: NaiveDate, range_start: NaiveDate, px_per_day: f64) -> f64 {
        let days = (date - range_start).num_days() as f64;
        self.chart_left() + days * px_per_day
    }

    /// Build the SVG document for a layout
    fn generate_svg(&self, layout: &TimelineLayout) -> Document {
        let rows = layout.slots.len();
        let width = self.total_width();
        let height = self.total_height(rows);
        let px_per_day = self.pixels_per_day(layout.range);

        let background = Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", "#ffffff");

        Document::new()
            .set("id", "gantt-svg")
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0, 0, width, height))
            .add(background)
            .add(self.render_gridlines(rows))
            .add(self.render_ticks(layout, px_per_day))
            .add(self.render_bars(layout, px_per_day))
            .add(self.render_modules(layout, px_per_day))
            .add(self.render_axis_titles(rows))
    }

    /// One faint dashed line at the bottom of every row slot
    fn render_gridlines(&self, rows: usize) -> Group {
        let mut group = Group::new().set("class", "gridlines");
        for row in 0..rows {
            let y = self.row_top(row + 1);
            group = group.add(
                Line::new()
                    .set("x1", self.padding)
                    .set("y1", y)
                    .set("x2", self.chart_right())
                    .set("y2", y)
                    .set("stroke", "#d0d0d0")
                    .set("stroke-width", 0.5)
                    .set("stroke-dasharray", "4,4"),
            );
        }
        group
    }

    /// Month tick marks and labels along the header
    fn render_ticks(&self, layout: &TimelineLayout, px_per_day: f64) -> Group {
        let mut group = Group::new().set("class", "ticks");
        let bottom = self.chart_top();
        let chart_bottom = self.row_top(layout.slots.len());

        for (date, label) in &layout.ticks {
            let x = self.date_to_x(*date, layout.range.0, px_per_day);
            group = group
                .add(
                    Line::new()
                        .set("x1", x)
                        .set("y1", bottom - 10)
                        .set("x2", x)
                        .set("y2", chart_bottom)
                        .set("stroke", "#ecf0f1")
                        .set("stroke-width", 1),
                )
                .add(
                    Text::new(label.as_str())
                        .set("x", x)
                        .set("y", bottom - 15)
                        .set("font-family", self.font_family.as_str())
                        .set("font-size", 11)
                        .set("fill", "#2c3e50")
                        .set("text-anchor", "middle"),
                );
        }
        group
    }

    fn render_bars(&self, layout: &TimelineLayout, px_per_day: f64) -> Group {
        let mut group = Group::new().set("class", "bars");
        for slot in &layout.slots {
            group = group.add(self.render_bar(slot, layout.range.0, px_per_day));
        }
        group
    }

    /// Row label plus the bar, when the row has a datable span
    fn render_bar(&self, slot: &BarSlot, range_start: NaiveDate, px_per_day: f64) -> Group {
        let y = self.row_top(slot.row);
        let bar_height = (f64::from(self.row_height) * 0.6) as u32;
        let bar_y = y + (self.row_height - bar_height) / 2;

        let mut group = Group::new().set("class", "row").add(
            Text::new(truncate(&slot.label, 32))
                .set("x", self.chart_left() - 8.0)
                .set("y", y + self.row_height / 2 + 4)
                .set("font-family", self.font_family.as_str())
                .set("font-size", 12)
                .set("fill", "#2c3e50")
                .set("text-anchor", "end"),
        );

        if let Some((start, end)) = slot.span {
            let x_start = self.date_to_x(start, range_start, px_per_day);
            let x_end = self.date_to_x(end, range_start, px_per_day);
            group = group.add(
                Rectangle::new()
                    .set("class", "task-bar")
                    .set("data-row", slot.row.to_string())
                    .set("x", x_start)
                    .set("y", bar_y)
                    .set("width", (x_end - x_start).max(4.0))
                    .set("height", bar_height)
                    .set("rx", 3)
                    .set("ry", 3)
                    .set("fill", slot.color.as_str()),
            );
        }
        group
    }

    /// Vertical divider, callout and horizontal divider for every module
    fn render_modules(&self, layout: &TimelineLayout, px_per_day: f64) -> Group {
        let mut group = Group::new().set("class", "modules");
        let top = self.chart_top();
        let bottom = self.row_top(layout.slots.len());

        for marker in &layout.modules {
            let x = self.date_to_x(marker.end, layout.range.0, px_per_day);
            group = group.add(
                Line::new()
                    .set("class", "module-divider")
                    .set("x1", x)
                    .set("y1", top)
                    .set("x2", x)
                    .set("y2", bottom)
                    .set("stroke", self.divider_color.as_str())
                    .set("stroke-width", 1.5)
                    .set("stroke-dasharray", "6,4"),
            );
            group = group.add(self.render_callout(marker, x));
        }

        for row in layout.divider_rows() {
            let y = self.row_top(row + 1);
            group = group.add(
                Line::new()
                    .set("class", "module-separator")
                    .set("x1", self.padding)
                    .set("y1", y)
                    .set("x2", self.chart_right())
                    .set("y2", y)
                    .set("stroke", "#7f8c8d")
                    .set("stroke-width", 2),
            );
        }
        group
    }

    /// Left edge of a callout box next to the divider at `x`.
    ///
    /// The box sits right of the divider unless it would run past the
    /// drawing, in which case it flips to the left side.
    fn callout_left(&self, x: f64, box_width: f64) -> f64 {
        let limit = self.chart_right() + f64::from(self.padding);
        if x + 4.0 + box_width > limit {
            (x - 4.0 - box_width).max(0.0)
        } else {
            x + 4.0
        }
    }

    /// Module name box beside its divider
    fn render_callout(&self, marker: &ModuleMarker, x: f64) -> Group {
        let lines: Vec<&str> = marker.name.lines().collect();
        let line_height = 13;
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let box_width = longest as f64 * 7.5 + 10.0;
        let box_height = lines.len() as u32 * line_height + 6;
        let left = self.callout_left(x, box_width);
        let y = self.row_top(marker.last_row) + 2;

        let mut group = Group::new().set("class", "module-callout").add(
            Rectangle::new()
                .set("x", left)
                .set("y", y)
                .set("width", box_width)
                .set("height", box_height)
                .set("rx", 3)
                .set("fill", "#fff5ee")
                .set("stroke", self.divider_color.as_str()),
        );

        for (i, line) in lines.iter().enumerate() {
            group = group.add(
                Text::new(*line)
                    .set("x", left + 5.0)
                    .set("y", y + 14 + i as u32 * line_height)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", 11)
                    .set("fill", "#2c3e50"),
            );
        }
        group
    }

    fn render_axis_titles(&self, rows: usize) -> Group {
        let x_center = self.chart_left() + f64::from(self.chart_width) / 2.0;
        let y_center = self.chart_top() + rows as u32 * self.row_height / 2;

        Group::new()
            .set("class", "axis-titles")
            .add(
                Text::new(self.x_title.as_str())
                    .set("x", x_center)
                    .set("y", self.row_top(rows) + 24)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", 13)
                    .set("fill", "#2c3e50")
                    .set("text-anchor", "middle"),
            )
            .add(
                Text::new(self.y_title.as_str())
                    .set("x", self.padding)
                    .set("y", y_center)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", 13)
                    .set("fill", "#2c3e50")
                    .set("text-anchor", "middle")
                    .set("transform", format!("rotate(-90 {} {})", self.padding, y_center)),
            )
    }

    /// Owner legend entries as HTML
    fn generate_legend(&self, layout: &TimelineLayout) -> String {
        layout
            .owners
            .entries()
            .iter()
            .map(|(owner, color)| {
                format!(
                    r#"            <span class="legend-item"><span class="legend-box" style="background: {}"></span>{}</span>"#,
                    html_escape(color),
                    html_escape(owner)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Tooltip payload, one entry per row, as a `<script>`-safe JSON array
    fn tooltip_json(table: &MilestoneTable) -> Result<String, RenderError> {
        let data: Vec<BarTooltip<'_>> = table
            .rows
            .iter()
            .map(|row| BarTooltip {
                name: &row.name,
                start: row.start.map(|d| d.format("%Y-%m-%d").to_string()),
                end: row.end.format("%Y-%m-%d").to_string(),
                owner: &row.owner,
                module: &row.module,
            })
            .collect();

        let json = serde_json::to_string(&data)
            .map_err(|e| RenderError::Format(format!("Failed to encode tooltip data: {}", e)))?;
        Ok(json.replace("</", "<\\/"))
    }

    fn generate_css(&self) -> String {
        format!(
            r#"        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: {font};
            background: #ffffff;
            color: #2c3e50;
            padding: 20px;
        }}
        .gantt-container {{
            max-width: 100%;
            overflow-x: auto;
        }}
        .gantt-header {{
            display: flex;
            justify-content: space-between;
            align-items: center;
            margin-bottom: 16px;
        }}
        .gantt-header h1 {{
            font-size: 1.5rem;
            font-weight: 600;
        }}
        .gantt-controls button {{
            padding: 8px 16px;
            margin-left: 8px;
            border: 1px solid #2c3e50;
            background: transparent;
            color: #2c3e50;
            cursor: pointer;
            border-radius: 4px;
            font-size: 14px;
        }}
        .gantt-controls button:hover {{
            background: rgba(128,128,128,0.2);
        }}
        .gantt-wrapper {{
            overflow-x: auto;
            border: 1px solid rgba(128,128,128,0.3);
            border-radius: 8px;
        }}
        .gantt-legend {{
            display: flex;
            flex-wrap: wrap;
            gap: 24px;
            margin-top: 16px;
            font-size: 13px;
        }}
        .legend-item {{
            display: flex;
            align-items: center;
            gap: 6px;
        }}
        .legend-box {{
            width: 16px;
            height: 12px;
            border-radius: 2px;
        }}
        .task-bar {{
            cursor: pointer;
            transition: opacity 0.2s;
        }}
        .task-bar:hover {{
            opacity: 0.8;
        }}
        .tooltip {{
            position: fixed;
            background: rgba(0,0,0,0.9);
            color: white;
            padding: 12px;
            border-radius: 6px;
            font-size: 13px;
            pointer-events: none;
            opacity: 0;
            transition: opacity 0.2s;
            z-index: 1000;
            max-width: 300px;
            white-space: pre-line;
        }}
        .tooltip.visible {{
            opacity: 1;
        }}
        .tooltip .task-name {{
            font-weight: 600;
            margin-bottom: 8px;
        }}
        .tooltip .task-dates {{
            color: #aaa;
        }}"#,
            font = self.font_family,
        )
    }

    /// Tooltip and zoom scripts
    fn generate_js(&self, tooltip_json: &str) -> String {
        format!(
            r#"        const rowData = {tooltip_json};

        // Zoom functionality
        let currentZoom = 1;
        const svg = document.getElementById('gantt-svg');

        function zoomIn() {{
            currentZoom = Math.min(currentZoom * 1.2, 3);
            applyZoom();
        }}

        function zoomOut() {{
            currentZoom = Math.max(currentZoom / 1.2, 0.5);
            applyZoom();
        }}

        function resetZoom() {{
            currentZoom = 1;
            applyZoom();
        }}

        function applyZoom() {{
            svg.style.transform = `scale(${{currentZoom}})`;
            svg.style.transformOrigin = 'top left';
        }}

        // Tooltip functionality
        const tooltip = document.getElementById('tooltip');

        function field(label, value) {{
            const line = document.createElement('div');
            line.textContent = label + value;
            return line;
        }}

        document.querySelectorAll('.task-bar').forEach(bar => {{
            bar.addEventListener('mouseenter', () => {{
                const data = rowData[Number(bar.getAttribute('data-row'))];
                if (!data) return;
                tooltip.replaceChildren();
                const name = field('', data.name);
                name.className = 'task-name';
                tooltip.appendChild(name);
                const dates = field('', (data.start || '?') + ' → ' + data.end);
                dates.className = 'task-dates';
                tooltip.appendChild(dates);
                if (data.owner) tooltip.appendChild(field('Owner: ', data.owner));
                if (data.module) tooltip.appendChild(field('Module: ', data.module));
                tooltip.classList.add('visible');
            }});

            bar.addEventListener('mousemove', (e) => {{
                tooltip.style.left = (e.clientX + 15) + 'px';
                tooltip.style.top = (e.clientY + 15) + 'px';
            }});

            bar.addEventListener('mouseleave', () => {{
                tooltip.classList.remove('visible');
            }});
        }});"#,
            tooltip_json = tooltip_json,
        )
    }

    /// Generate the complete HTML document
    fn generate_html(
        &self,
        table: &MilestoneTable,
        layout: &TimelineLayout,
    ) -> Result<String, RenderError> {
        let svg_content = self.generate_svg(layout).to_string();
        let css = self.generate_css();
        let legend = self.generate_legend(layout);
        let (controls, js) = if self.interactive {
            (
                r#"            <div class="gantt-controls">
                <button onclick="zoomIn()" title="Zoom In">+</button>
                <button onclick="zoomOut()" title="Zoom Out">−</button>
                <button onclick="resetZoom()" title="Reset">Reset</button>
            </div>"#,
                self.generate_js(&Self::tooltip_json(table)?),
            )
        } else {
            ("", String::new())
        };

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <div class="gantt-container">
        <div class="gantt-header">
            <h1>{title}</h1>
{controls}
        </div>
        <div class="gantt-wrapper" id="gantt-wrapper">
{svg_content}
        </div>
        <div class="gantt-legend">
{legend}
        </div>
        <div id="tooltip" class="tooltip"></div>
    </div>
    <script>
{js}
    </script>
</body>
</html>"#,
            title = html_escape(&table.title),
            css = css,
            controls = controls,
            svg_content = svg_content,
            legend = legend,
            js = js,
        ))
    }
}

/// Per-row tooltip payload
#[derive(Serialize)]
struct BarTooltip<'a> {
    name: &'a str,
    start: Option<String>,
    end: String,
    owner: &'a str,
    module: &'a str,
}

impl Renderer for HtmlTimelineRenderer {
    type Output = String;

    fn render(&self, table: &MilestoneTable) -> Result<String, RenderError> {
        let layout = TimelineLayout::build(table, &self.palette, &self.fallback_color)?;
        debug!(
            rows = layout.slots.len(),
            ticks = layout.ticks.len(),
            modules = layout.modules.len(),
            owners = layout.owners.entries().len(),
            "timeline layout"
        );
        self.generate_html(table, &layout)
    }
}

/// Truncate a string with ellipsis
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        format!(
            "{}…",
            s.chars().take(max.saturating_sub(1)).collect::<String>()
        )
    }
}
