//! Optional TOML configuration
//!
//! ```toml
//! title = "Gantt Chart"
//!
//! [excel]
//! default_color = "FFFFFF"
//! [excel.owner_colors]
//! "工艺" = "FFC7CE"
//!
//! [timeline]
//! palette = ["#636EFA", "#EF553B"]
//! x_title = "Date"
//! y_title = "Milestone"
//! ```
//!
//! Every key is optional; unknown keys are rejected.

use anyhow::{bail, Context, Result};
use milegantt_render::{parse_hex_color, ExcelGanttRenderer, HtmlTimelineRenderer};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "milegantt.toml";

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Chart title, used for the HTML document
    pub title: Option<String>,
    pub excel: ExcelConfig,
    pub timeline: TimelineConfig,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ExcelConfig {
    /// Fill for owners without an entry, `RRGGBB`
    pub default_color: Option<String>,
    /// Owner fills, merged over the built-in table
    pub owner_colors: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TimelineConfig {
    pub palette: Option<Vec<String>>,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
}

impl Config {
    /// Load the configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    /// Resolve the config to use: an explicit path must exist, otherwise
    /// `milegantt.toml` in `dir` is used when present
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Option<Self>> {
        if let Some(path) = explicit {
            return Self::load(path).map(Some);
        }
        let fallback = dir.join(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            return Self::load(&fallback).map(Some);
        }
        Ok(None)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Spreadsheet renderer with the configured colors applied
    pub fn excel_renderer(&self) -> Result<ExcelGanttRenderer> {
        let mut renderer = ExcelGanttRenderer::new();
        if let Some(color) = &self.excel.default_color {
            renderer = renderer.default_color(hex_color("excel.default_color", color)?);
        }
        for (owner, color) in &self.excel.owner_colors {
            let rgb = hex_color(&format!("excel.owner_colors.{owner}"), color)?;
            renderer = renderer.owner_color(owner.as_str(), rgb);
        }
        Ok(renderer)
    }

    /// Timeline renderer with the configured palette and titles applied
    pub fn timeline_renderer(&self) -> Result<HtmlTimelineRenderer> {
        let mut renderer = HtmlTimelineRenderer::new();
        if let Some(palette) = &self.timeline.palette {
            if palette.is_empty() {
                bail!("timeline.palette must list at least one color");
            }
            renderer = renderer.palette(palette.iter().cloned());
        }
        if let Some(title) = &self.timeline.x_title {
            renderer = renderer.x_title(title.as_str());
        }
        if let Some(title) = &self.timeline.y_title {
            renderer = renderer.y_title(title.as_str());
        }
        Ok(renderer)
    }
}

fn hex_color(key: &str, value: &str) -> Result<u32> {
    match parse_hex_color(value) {
        Some(rgb) => Ok(rgb),
        None => bail!("{key}: expected a color like \"FFC7CE\", got {value:?}"),
    }
}
