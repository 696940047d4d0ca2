//! Command-line parsing for the energy production reporter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fetch/aggregation code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::{EnergyUnit, TimeUnit};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "se", version, about = "SolarEdge energy production reporter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a date range, print production summaries/charts, and optionally export CSV.
    Report(ReportArgs),
    /// Print the best-effort site overview and environmental benefits.
    Overview(SiteArgs),
}

/// Credential overrides. Anything not given here falls back to the
/// environment (`SE_API_KEY` / `SE_SITE_ID`, `.env` supported).
#[derive(Debug, Args, Clone)]
pub struct SiteArgs {
    /// Monitoring API key.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Site identifier.
    #[arg(long)]
    pub site_id: Option<String>,
}

/// Options for fetching and reporting a date range.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// First day of the range (inclusive). Defaults to January 1st of the current year.
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day of the range (inclusive). Defaults to today.
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Sampling granularity requested from the API.
    #[arg(long, value_enum, default_value_t = TimeUnit::QuarterOfAnHour)]
    pub time_unit: TimeUnit,

    /// Display unit for energy values.
    #[arg(long, value_enum, default_value_t = EnergyUnit::Wh)]
    pub unit: EnergyUnit,

    /// Render terminal charts (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal charts.
    #[arg(long)]
    pub no_plot: bool,

    /// Chart width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Chart height (rows).
    #[arg(long, default_value_t = 15)]
    pub height: usize,

    /// Export the normalized dataset to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,
}
