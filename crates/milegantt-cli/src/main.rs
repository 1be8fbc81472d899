//! milegantt CLI - milestone CSV to Gantt chart
//!
//! Reads a milestone table, fills in inherited modules and implied start
//! dates, then writes a day-grid spreadsheet and an interactive timeline.

mod config;

use anyhow::{bail, Context, Result};
use clap::Parser;
use milegantt_core::Renderer;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "milegantt")]
#[command(author, version, about = "Milestone Gantt chart generator", long_about = None)]
struct Cli {
    /// Milestone table (CSV)
    #[arg(short, long, value_name = "FILE", default_value = "projects.csv")]
    input: PathBuf,

    /// Spreadsheet output
    #[arg(long, value_name = "FILE", default_value = "gantt_chart.xlsx")]
    xlsx: PathBuf,

    /// Timeline output
    #[arg(long, value_name = "FILE", default_value = "gantt_chart.html")]
    html: PathBuf,

    /// Config file (defaults to ./milegantt.toml when present)
    #[arg(short, long, value_name = "FILE", env = "MILEGANTT_CONFIG")]
    config: Option<PathBuf>,

    /// Skip the spreadsheet
    #[arg(long)]
    no_xlsx: bool,

    /// Skip the timeline
    #[arg(long)]
    no_html: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(&cli)
}

/// `RUST_LOG` wins; otherwise the `-v` count picks the level
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    if cli.no_xlsx && cli.no_html {
        bail!("Nothing to do: both --no-xlsx and --no-html were given");
    }

    let config = Config::resolve(cli.config.as_deref(), Path::new("."))?.unwrap_or_default();

    let mut table = milegantt_parser::parse_file(&cli.input)
        .with_context(|| format!("Failed to load milestones from '{}'", cli.input.display()))?;
    if let Some(title) = &config.title {
        table.title = title.clone();
    }

    table.normalize();

    // render everything before touching the filesystem
    let xlsx = if cli.no_xlsx {
        None
    } else {
        let bytes = config
            .excel_renderer()?
            .render(&table)
            .context("Failed to render spreadsheet")?;
        Some(bytes)
    };
    let html = if cli.no_html {
        None
    } else {
        let document = config
            .timeline_renderer()?
            .render(&table)
            .context("Failed to render timeline")?;
        Some(document)
    };

    if let Some(bytes) = xlsx {
        write_output(&cli.xlsx, &bytes)?;
        println!("Gantt chart written to {}", cli.xlsx.display());
    }
    if let Some(document) = html {
        write_output(&cli.html, document.as_bytes())?;
        println!("Timeline written to {}", cli.html.display());
    }

    Ok(())
}

fn write_output(path: &Path, contents: &[u8]) -> Result<()> {
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    info!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}
