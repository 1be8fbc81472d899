//! # milegantt-render
//!
//! Rendering backends for milestone tables.
//!
//! This crate provides:
//! - A spreadsheet Gantt chart: one column per calendar day, owner-colored
//!   day cells ([`ExcelGanttRenderer`])
//! - An interactive HTML timeline: one bar per milestone, month ticks,
//!   module dividers ([`HtmlTimelineRenderer`])
//!
//! Both implement [`milegantt_core::Renderer`] and expect a normalized table.
//!
//! ## Example
//!
//! ```rust,ignore
//! use milegantt_core::Renderer;
//! use milegantt_render::{ExcelGanttRenderer, HtmlTimelineRenderer};
//!
//! let mut table = milegantt_parser::parse_file("projects.csv".as_ref())?;
//! table.normalize();
//!
//! let xlsx_bytes = ExcelGanttRenderer::new().render(&table)?;
//! std::fs::write("gantt_chart.xlsx", xlsx_bytes)?;
//!
//! let html = HtmlTimelineRenderer::new().render(&table)?;
//! std::fs::write("gantt_chart.html", html)?;
//! ```

pub mod excel;
pub mod html;
pub mod timeline;

pub use excel::{CellFill, ExcelGanttRenderer, SheetPlan};
pub use html::HtmlTimelineRenderer;
pub use timeline::{OwnerColors, TimelineLayout, DEFAULT_PALETTE, FALLBACK_COLOR};

/// Parse an `RRGGBB` or `#RRGGBB` color into its numeric value
pub fn parse_hex_color(value: &str) -> Option<u32> {
    let hex = value.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

/// HTML-escape a string
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
