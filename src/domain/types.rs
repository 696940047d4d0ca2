//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fetching and aggregation
//! - exported to CSV
//! - reused by future front-ends (dashboards, schedulers)

use std::path::PathBuf;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Sampling granularity tag accepted by the monitoring API's energy endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TimeUnit {
    QuarterOfAnHour,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    /// The tag the remote API expects in the `timeUnit` query parameter.
    pub fn api_tag(self) -> &'static str {
        match self {
            TimeUnit::QuarterOfAnHour => "QUARTER_OF_AN_HOUR",
            TimeUnit::Hour => "HOUR",
            TimeUnit::Day => "DAY",
            TimeUnit::Week => "WEEK",
            TimeUnit::Month => "MONTH",
            TimeUnit::Year => "YEAR",
        }
    }

    /// Span of one sample in hours, where the granularity has a fixed
    /// sub-daily span.
    ///
    /// Energy-to-power conversion (`W = Wh / hours`) is only meaningful for
    /// these granularities; coarser units return `None` and power figures are
    /// omitted from reports.
    pub fn sample_hours(self) -> Option<f64> {
        match self {
            TimeUnit::QuarterOfAnHour => Some(0.25),
            TimeUnit::Hour => Some(1.0),
            TimeUnit::Day | TimeUnit::Week | TimeUnit::Month | TimeUnit::Year => None,
        }
    }
}

impl std::fmt::Display for TimeUnit {
    /// Matches the clap value name, so `default_value_t` round-trips.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TimeUnit::QuarterOfAnHour => "quarter-of-an-hour",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
        };
        f.write_str(name)
    }
}

/// Display unit for energy values.
///
/// The dataset always stores Wh; the unit only affects rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EnergyUnit {
    Wh,
    Kwh,
}

impl EnergyUnit {
    /// Divisor applied to raw Wh values for display.
    pub fn factor(self) -> f64 {
        match self {
            EnergyUnit::Wh => 1.0,
            EnergyUnit::Kwh => 1000.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EnergyUnit::Wh => "Wh",
            EnergyUnit::Kwh => "kWh",
        }
    }
}

impl std::fmt::Display for EnergyUnit {
    /// Matches the clap value name, so `default_value_t` round-trips.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EnergyUnit::Wh => "wh",
            EnergyUnit::Kwh => "kwh",
        };
        f.write_str(name)
    }
}

/// Inclusive calendar date range.
///
/// `start <= end` is the caller's responsibility; an inverted range is not an
/// error, it simply plans to zero chunks and fetches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range covering exactly one calendar day.
    pub fn single_day(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    /// Number of calendar days covered (inclusive). Negative for inverted ranges.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Iterate every calendar day in the range, ascending.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }

    /// The day immediately after this range.
    pub fn next_day(&self) -> NaiveDate {
        self.end + Duration::days(1)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}..{}", self.start, self.end)
        }
    }
}

/// One normalized, time-stamped energy reading.
///
/// `value` is always a concrete number: the remote API reports missing
/// readings as null, which normalization maps to 0 Wh.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRow {
    pub timestamp: NaiveDateTime,
    /// Energy for the sample interval, in Wh.
    pub value: f64,

    pub date: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub day: u32,

    /// Fractional hour of day: `hour + minute / 60`.
    pub hour: f64,
    /// Nearest whole hour, clamped to 23 (23:30 and later rounds up to 24,
    /// which is outside the 0-23 grouping domain).
    pub hour_rounded: u32,
}

impl SampleRow {
    pub fn new(timestamp: NaiveDateTime, value: f64) -> Self {
        let date = timestamp.date();
        let hour = timestamp.hour() as f64 + timestamp.minute() as f64 / 60.0;
        let hour_rounded = (hour.round() as u32).min(23);
        Self {
            timestamp,
            value,
            date,
            year: date.year(),
            month: date.month(),
            day: date.day(),
            hour,
            hour_rounded,
        }
    }
}

/// Whether a fetch failure happened at chunk or fallback-day granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarnScope {
    Chunk,
    Day,
}

/// A recoverable fetch problem surfaced to the caller.
///
/// The pipeline never turns these into hard errors; the presentation layer
/// decides how (and whether) to render them.
#[derive(Debug, Clone)]
pub struct FetchWarning {
    pub scope: WarnScope,
    pub range: DateRange,
    pub message: String,
}

impl std::fmt::Display for FetchWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.scope {
            WarnScope::Chunk => write!(f, "chunk {}: {}", self.range, self.message),
            WarnScope::Day => write!(f, "day {}: {}", self.range.start, self.message),
        }
    }
}

/// Site-level production snapshot from the overview endpoint.
#[derive(Debug, Clone)]
pub struct SiteOverview {
    pub current_power_w: f64,
    pub today_wh: f64,
    pub lifetime_wh: f64,
}

/// CO2 savings from the environmental-benefits endpoint.
#[derive(Debug, Clone)]
pub struct EnvBenefits {
    pub co2_saved_kg: f64,
}

/// Average CO2 uptake of one tree over its lifetime, in kg.
///
/// 12940 kg per 386 trees, the conversion the monitoring vendor quotes.
const KG_CO2_PER_TREE: f64 = 12940.0 / 386.0;

impl EnvBenefits {
    /// "Trees planted" equivalent of the CO2 saved.
    pub fn trees_equivalent(&self) -> i64 {
        if self.co2_saved_kg > 0.0 {
            (self.co2_saved_kg / KG_CO2_PER_TREE).round() as i64
        } else {
            0
        }
    }
}

/// A full report run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub range: DateRange,
    pub time_unit: TimeUnit,
    pub unit: EnergyUnit,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export: Option<PathBuf>,
}
