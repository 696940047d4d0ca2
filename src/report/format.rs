//! Formatted terminal output for reports and the site overview.

use crate::domain::{EnvBenefits, FetchWarning, ReportConfig, SiteOverview};
use crate::report::{MonthlyEnergy, ProductionSummary};

/// Format the headline report: range, totals, peak power, monthly table, and
/// any partial-data warnings.
pub fn format_report(
    summary: &ProductionSummary,
    monthly: &[MonthlyEnergy],
    warnings: &[FetchWarning],
    config: &ReportConfig,
) -> String {
    let mut out = String::new();
    let unit = config.unit;

    out.push_str("=== se - Energy Production Report ===\n");
    out.push_str(&format!(
        "Range: {} ({})\n",
        config.range,
        config.time_unit.api_tag()
    ));
    out.push_str(&format!("Samples: n={}\n", summary.n_samples));
    out.push_str(&format!(
        "Total energy: {:.2} {}\n",
        summary.total_wh / unit.factor(),
        unit.label()
    ));

    if let Some(peak) = &summary.peak {
        match config.time_unit.sample_hours() {
            Some(hours) => {
                out.push_str(&format!(
                    "Peak power: {:.0} W at {}\n",
                    peak.value_wh / hours,
                    peak.timestamp
                ));
            }
            None => {
                out.push_str(&format!(
                    "Peak sample: {:.2} {} at {}\n",
                    peak.value_wh / unit.factor(),
                    unit.label(),
                    peak.timestamp
                ));
            }
        }
    }

    if !monthly.is_empty() {
        match config.time_unit.sample_hours() {
            Some(hours) => {
                out.push_str("\nMonthly avg vs peak power (W):\n");
                for m in monthly {
                    out.push_str(&format!(
                        "  {}  avg={:.0}  peak={:.0}\n",
                        m.label(),
                        m.mean_wh / hours,
                        m.peak_wh / hours
                    ));
                }
            }
            None => {
                out.push_str(&format!(
                    "\nMonthly avg vs peak sample ({}):\n",
                    unit.label()
                ));
                for m in monthly {
                    out.push_str(&format!(
                        "  {}  avg={:.2}  peak={:.2}\n",
                        m.label(),
                        m.mean_wh / unit.factor(),
                        m.peak_wh / unit.factor()
                    ));
                }
            }
        }
    }

    out.push_str(&format_warnings(warnings));
    out
}

/// Format the per-request warning list, or an empty string if there were none.
pub fn format_warnings(warnings: &[FetchWarning]) -> String {
    if warnings.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    out.push_str(&format!("\nWarnings (partial data, {}):\n", warnings.len()));
    for w in warnings {
        out.push_str(&format!("  - {w}\n"));
    }
    out
}

/// Format the best-effort site overview and environmental benefits.
///
/// Absent sections (failed best-effort calls) render as "unavailable" rather
/// than being dropped silently.
pub fn format_overview(overview: Option<&SiteOverview>, benefits: Option<&EnvBenefits>) -> String {
    let mut out = String::new();

    out.push_str("=== Site overview ===\n");
    match overview {
        Some(o) => {
            out.push_str(&format!("Current power: {:.0} W\n", o.current_power_w));
            out.push_str(&format!("Today: {:.0} Wh\n", o.today_wh));
            out.push_str(&format!("Lifetime: {:.0} kWh\n", o.lifetime_wh / 1000.0));
        }
        None => out.push_str("(unavailable)\n"),
    }

    out.push_str("\n=== Environmental benefits ===\n");
    match benefits {
        Some(b) => {
            out.push_str(&format!("CO2 saved: {:.0} kg\n", b.co2_saved_kg));
            out.push_str(&format!("Trees equivalent: {}\n", b.trees_equivalent()));
        }
        None => out.push_str("(unavailable)\n"),
    }

    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{DateRange, EnergyUnit, TimeUnit, WarnScope};
    use crate::report::PeakSample;

    fn config(time_unit: TimeUnit, unit: EnergyUnit) -> ReportConfig {
        ReportConfig {
            range: DateRange::new(
                NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2023, 3, 5).unwrap(),
            ),
            time_unit,
            unit,
            plot: false,
            plot_width: 80,
            plot_height: 15,
            export: None,
        }
    }

    #[test]
    fn report_converts_quarter_hour_energy_to_power() {
        let summary = ProductionSummary {
            n_samples: 4,
            total_wh: 1000.0,
            peak: Some(PeakSample {
                timestamp: NaiveDate::from_ymd_opt(2023, 2, 1)
                    .unwrap()
                    .and_hms_opt(12, 30, 0)
                    .unwrap(),
                value_wh: 500.0,
            }),
        };

        let text = format_report(&summary, &[], &[], &config(TimeUnit::QuarterOfAnHour, EnergyUnit::Wh));
        // 500 Wh over a quarter hour is 2000 W.
        assert!(text.contains("Peak power: 2000 W at 2023-02-01 12:30:00"));
        assert!(text.contains("Total energy: 1000.00 Wh"));
        assert!(!text.contains("Warnings"));
    }

    #[test]
    fn report_omits_power_for_daily_granularity() {
        let summary = ProductionSummary {
            n_samples: 1,
            total_wh: 5000.0,
            peak: Some(PeakSample {
                timestamp: NaiveDate::from_ymd_opt(2023, 2, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                value_wh: 5000.0,
            }),
        };

        let text = format_report(&summary, &[], &[], &config(TimeUnit::Day, EnergyUnit::Kwh));
        assert!(!text.contains("Peak power"));
        assert!(text.contains("Peak sample: 5.00 kWh"));
        assert!(text.contains("Total energy: 5.00 kWh"));
    }

    #[test]
    fn warnings_are_listed_with_their_scope() {
        let warnings = vec![
            FetchWarning {
                scope: WarnScope::Chunk,
                range: DateRange::new(
                    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                    NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
                ),
                message: "status 500".to_string(),
            },
            FetchWarning {
                scope: WarnScope::Day,
                range: DateRange::single_day(NaiveDate::from_ymd_opt(2023, 1, 4).unwrap()),
                message: "timed out".to_string(),
            },
        ];

        let text = format_warnings(&warnings);
        assert!(text.contains("Warnings (partial data, 2):"));
        assert!(text.contains("chunk 2023-01-01..2023-01-31: status 500"));
        assert!(text.contains("day 2023-01-04: timed out"));
    }

    #[test]
    fn overview_renders_absent_sections() {
        let text = format_overview(None, None);
        assert!(text.contains("=== Site overview ===\n(unavailable)"));
        assert!(text.contains("=== Environmental benefits ===\n(unavailable)"));
    }
}
