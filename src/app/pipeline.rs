//! Shared "report pipeline" logic used by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! chunk plan -> fetch (with day-level fallback) -> assemble -> aggregate
//!
//! The CLI can then focus on presentation (printing vs exporting).

use crate::data::{FetchCache, FetchOutcome, SolarClient};
use crate::data::fetch::EnergySource;
use crate::domain::ReportConfig;
use crate::error::AppError;
use crate::report::{
    DailyEnergy, HourlyAverage, MonthlyEnergy, ProductionSummary, daily_energy, hourly_profile,
    monthly_breakdown, summarize,
};

/// All computed outputs of a single `se report` run.
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub outcome: FetchOutcome,
    pub summary: ProductionSummary,
    pub daily: Vec<DailyEnergy>,
    pub hourly: Vec<HourlyAverage>,
    pub monthly: Vec<MonthlyEnergy>,
}

/// Execute the full report pipeline against the live monitoring API.
///
/// Fetch failures degrade to warnings inside the pipeline; the only hard
/// error raised here is a fully unreachable backend, which we detect by the
/// best-effort endpoints failing as well.
pub fn run_report(client: &SolarClient, config: &ReportConfig) -> Result<ReportOutput, AppError> {
    let mut cache = FetchCache::new();
    let output = run_report_with_source(client, &mut cache, config);

    if output.outcome.is_empty() && !output.outcome.warnings.is_empty() {
        let overview_dead = client.fetch_overview().is_err();
        let benefits_dead = client.fetch_env_benefits().is_err();
        if overview_dead && benefits_dead {
            return Err(AppError::new(
                4,
                "Monitoring API unreachable (every fetch failed). Check SE_API_KEY / SE_SITE_ID.",
            ));
        }
    }

    Ok(output)
}

/// Execute the report pipeline against any energy source.
///
/// This is the seam the tests use: no network, scripted sources, explicit
/// cache so repeated runs within a session stay idempotent.
pub fn run_report_with_source<S: EnergySource>(
    source: &S,
    cache: &mut FetchCache,
    config: &ReportConfig,
) -> ReportOutput {
    let outcome = cache.fetch(source, config.time_unit, config.range);

    let summary = summarize(&outcome.rows);
    let daily = daily_energy(&outcome.rows);
    let hourly = hourly_profile(&outcome.rows);
    let monthly = monthly_breakdown(&outcome.rows);

    ReportOutput {
        outcome,
        summary,
        daily,
        hourly,
        monthly,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{DateRange, EnergyUnit, SampleRow, TimeUnit};

    struct FlatSource;

    impl EnergySource for FlatSource {
        fn fetch_range(
            &self,
            _time_unit: TimeUnit,
            range: DateRange,
        ) -> Result<Vec<SampleRow>, AppError> {
            // Two samples per day: a morning and a noon reading.
            let mut rows = Vec::new();
            for day in range.days() {
                rows.push(SampleRow::new(day.and_hms_opt(8, 0, 0).unwrap(), 100.0));
                rows.push(SampleRow::new(day.and_hms_opt(12, 0, 0).unwrap(), 400.0));
            }
            Ok(rows)
        }
    }

    fn config() -> ReportConfig {
        ReportConfig {
            range: DateRange::new(
                NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2023, 2, 9).unwrap(),
            ),
            time_unit: TimeUnit::QuarterOfAnHour,
            unit: EnergyUnit::Wh,
            plot: false,
            plot_width: 80,
            plot_height: 15,
            export: None,
        }
    }

    #[test]
    fn pipeline_aggregates_the_assembled_dataset() {
        let mut cache = FetchCache::new();
        let run = run_report_with_source(&FlatSource, &mut cache, &config());

        // 40 days, two samples each.
        assert_eq!(run.summary.n_samples, 80);
        assert_eq!(run.summary.total_wh, 40.0 * 500.0);
        assert_eq!(run.daily.len(), 40);
        assert!(run.daily.iter().all(|d| d.total_wh == 500.0));
        assert_eq!(run.hourly.len(), 2);
        assert_eq!(run.monthly.len(), 2);
        assert!(run.outcome.warnings.is_empty());
    }

    #[test]
    fn repeated_runs_are_idempotent_within_a_session() {
        let mut cache = FetchCache::new();
        let first = run_report_with_source(&FlatSource, &mut cache, &config());
        let second = run_report_with_source(&FlatSource, &mut cache, &config());

        assert_eq!(first.outcome.rows, second.outcome.rows);
        assert_eq!(first.summary, second.summary);
        assert_eq!(cache.len(), 1);
    }
}
