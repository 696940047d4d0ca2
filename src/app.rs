//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves credentials and the requested date range
//! - runs the chunked fetch pipeline
//! - prints reports/charts
//! - writes optional exports

use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;

use crate::cli::{Command, ReportArgs, SiteArgs};
use crate::data::{SiteCredentials, SolarClient};
use crate::domain::{DateRange, ReportConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `se` binary.
pub fn run() -> Result<(), AppError> {
    // We want `se` and `se --start 2023-01-01` to behave like `se report ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Overview(args) => handle_overview(args),
    }
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let config = report_config_from_args(&args);
    let credentials = resolve_credentials(&args.site)?;
    let client = SolarClient::new(credentials)?;

    let run = pipeline::run_report(&client, &config)?;

    println!(
        "{}",
        crate::report::format_report(&run.summary, &run.monthly, &run.outcome.warnings, &config)
    );

    if config.plot && !run.outcome.is_empty() {
        println!(
            "{}",
            crate::plot::render_daily_bars(&run.daily, config.unit, config.plot_width, config.plot_height)
        );
        println!(
            "{}",
            crate::plot::render_hourly_profile(&run.hourly, config.unit, config.plot_width, config.plot_height)
        );
    }

    if let Some(path) = &config.export {
        crate::io::write_dataset_csv(path, &run.outcome.rows)?;
    }

    Ok(())
}

fn handle_overview(args: SiteArgs) -> Result<(), AppError> {
    let credentials = resolve_credentials(&args)?;
    let client = SolarClient::new(credentials)?;

    // Both endpoints are best-effort individually, but if neither answers the
    // backend (or the credentials) is simply broken and that is a hard error.
    let overview = client.fetch_overview().ok();
    let benefits = client.fetch_env_benefits().ok();

    if overview.is_none() && benefits.is_none() {
        return Err(AppError::new(
            4,
            "Monitoring API unreachable (overview and envBenefits both failed). Check SE_API_KEY / SE_SITE_ID.",
        ));
    }

    println!(
        "{}",
        crate::report::format_overview(overview.as_ref(), benefits.as_ref())
    );
    Ok(())
}

/// Resolve credentials from flags, falling back to the environment for
/// anything not given on the command line.
fn resolve_credentials(args: &SiteArgs) -> Result<SiteCredentials, AppError> {
    match (&args.api_key, &args.site_id) {
        (Some(api_key), Some(site_id)) => Ok(SiteCredentials {
            api_key: api_key.clone(),
            site_id: site_id.clone(),
        }),
        _ => {
            let mut credentials = SiteCredentials::from_env()?;
            if let Some(api_key) = &args.api_key {
                credentials.api_key = api_key.clone();
            }
            if let Some(site_id) = &args.site_id {
                credentials.site_id = site_id.clone();
            }
            Ok(credentials)
        }
    }
}

pub fn report_config_from_args(args: &ReportArgs) -> ReportConfig {
    let today = Local::now().date_naive();
    let start = args
        .start
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today));
    let end = args.end.unwrap_or(today);

    ReportConfig {
        range: DateRange::new(start, end),
        time_unit: args.time_unit,
        unit: args.unit,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export: args.export.clone(),
    }
}

/// Rewrite argv so `se` defaults to `se report`.
///
/// Rules:
/// - `se`                        -> `se report`
/// - `se --start 2023-01-01 ...` -> `se report --start 2023-01-01 ...`
/// - `se --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("report".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "report" | "overview");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "report flags".
    if arg1.starts_with('-') {
        argv.insert(1, "report".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_report() {
        assert_eq!(rewrite_args(argv(&["se"])), argv(&["se", "report"]));
        assert_eq!(
            rewrite_args(argv(&["se", "--start", "2023-01-01"])),
            argv(&["se", "report", "--start", "2023-01-01"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["se", "overview"])),
            argv(&["se", "overview"])
        );
        assert_eq!(rewrite_args(argv(&["se", "--help"])), argv(&["se", "--help"]));
    }
}
