//! Aggregated views over the normalized dataset.
//!
//! Every aggregation here assumes the dataset is chronological, which the
//! fetch pipeline guarantees. We keep the math in this module and the
//! formatting in `report::format` so:
//! - the aggregation code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::SampleRow;

pub mod format;

pub use format::*;

/// Per-date total and peak energy.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyEnergy {
    pub date: NaiveDate,
    pub total_wh: f64,
    pub peak_wh: f64,
}

/// Sum and max energy per calendar date, ascending.
pub fn daily_energy(rows: &[SampleRow]) -> Vec<DailyEnergy> {
    let mut by_date: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for row in rows {
        let entry = by_date.entry(row.date).or_insert((0.0, 0.0));
        entry.0 += row.value;
        entry.1 = entry.1.max(row.value);
    }
    by_date
        .into_iter()
        .map(|(date, (total_wh, peak_wh))| DailyEnergy { date, total_wh, peak_wh })
        .collect()
}

/// Mean energy per rounded hour of day.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyAverage {
    pub hour: u32,
    pub mean_wh: f64,
}

/// Average production profile keyed by rounded hour (0-23), ascending.
///
/// Hours with no samples at all are absent, not zero-filled, mirroring how
/// failed days are absent from the dataset itself.
pub fn hourly_profile(rows: &[SampleRow]) -> Vec<HourlyAverage> {
    let mut by_hour: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    for row in rows {
        let entry = by_hour.entry(row.hour_rounded).or_insert((0.0, 0));
        entry.0 += row.value;
        entry.1 += 1;
    }
    by_hour
        .into_iter()
        .map(|(hour, (sum, count))| HourlyAverage {
            hour,
            mean_wh: sum / count as f64,
        })
        .collect()
}

/// Per-month mean and peak sample energy.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyEnergy {
    pub year: i32,
    pub month: u32,
    pub mean_wh: f64,
    pub peak_wh: f64,
}

impl MonthlyEnergy {
    /// `YYYY-MM` label for tables and chart axes.
    pub fn label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

/// Average vs peak sample energy per (year, month), ascending.
pub fn monthly_breakdown(rows: &[SampleRow]) -> Vec<MonthlyEnergy> {
    let mut by_month: BTreeMap<(i32, u32), (f64, f64, usize)> = BTreeMap::new();
    for row in rows {
        let entry = by_month.entry((row.year, row.month)).or_insert((0.0, 0.0, 0));
        entry.0 += row.value;
        entry.1 = entry.1.max(row.value);
        entry.2 += 1;
    }
    by_month
        .into_iter()
        .map(|((year, month), (sum, peak_wh, count))| MonthlyEnergy {
            year,
            month,
            mean_wh: sum / count as f64,
            peak_wh,
        })
        .collect()
}

/// The sample with the highest energy reading.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakSample {
    pub timestamp: chrono::NaiveDateTime,
    pub value_wh: f64,
}

/// Headline figures for a fetched dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionSummary {
    pub n_samples: usize,
    pub total_wh: f64,
    pub peak: Option<PeakSample>,
}

pub fn summarize(rows: &[SampleRow]) -> ProductionSummary {
    let total_wh = rows.iter().map(|r| r.value).sum();
    let peak = rows
        .iter()
        .max_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(std::cmp::Ordering::Equal))
        .map(|r| PeakSample {
            timestamp: r.timestamp,
            value_wh: r.value,
        });

    ProductionSummary {
        n_samples: rows.len(),
        total_wh,
        peak,
    }
}
