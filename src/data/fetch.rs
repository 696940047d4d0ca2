//! Chunked, fault-tolerant energy fetching.
//!
//! The coordinator drives the chunk plan sequentially: each chunk gets one
//! attempt; a failed chunk degrades to per-day retries; a day that fails again
//! is skipped and recorded as a warning. Fetch failures never abort the run —
//! the worst case is an empty dataset accompanied by warnings.

use crate::data::chunk::{MAX_CHUNK_DAYS, plan_chunks};
use crate::domain::{DateRange, FetchWarning, SampleRow, TimeUnit, WarnScope};
use crate::error::AppError;

/// A source of normalized energy samples for one date sub-range.
///
/// `SolarClient` is the production implementation; tests substitute scripted
/// in-memory sources.
pub trait EnergySource {
    fn fetch_range(
        &self,
        time_unit: TimeUnit,
        range: DateRange,
    ) -> Result<Vec<SampleRow>, AppError>;
}

impl EnergySource for crate::data::api::SolarClient {
    fn fetch_range(
        &self,
        time_unit: TimeUnit,
        range: DateRange,
    ) -> Result<Vec<SampleRow>, AppError> {
        self.fetch_energy_range(time_unit, range)
    }
}

/// Everything a chunked fetch produced: the assembled rows (chronological) and
/// one warning per failed chunk or fallback day.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub rows: Vec<SampleRow>,
    pub warnings: Vec<FetchWarning>,
}

impl FetchOutcome {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Fetch a full date range chunk by chunk, assembling results in order.
///
/// Chunks and fallback days are processed in ascending date order, so simple
/// concatenation keeps the dataset chronological. Rows exist only for
/// sub-ranges that were actually retrieved; failed days are absent, not
/// zero-filled.
pub fn fetch_energy_chunked<S: EnergySource>(
    source: &S,
    time_unit: TimeUnit,
    range: DateRange,
) -> FetchOutcome {
    let mut outcome = FetchOutcome::default();

    for chunk in plan_chunks(range, MAX_CHUNK_DAYS) {
        match source.fetch_range(time_unit, chunk) {
            Ok(rows) => outcome.rows.extend(rows),
            Err(err) => {
                outcome.warnings.push(FetchWarning {
                    scope: WarnScope::Chunk,
                    range: chunk,
                    message: err.to_string(),
                });
                fetch_days_fallback(source, time_unit, chunk, &mut outcome);
            }
        }
    }

    outcome
}

/// Per-day retry for a failed chunk. Each day stands alone: a success
/// contributes its rows, a second failure skips that day with a warning.
fn fetch_days_fallback<S: EnergySource>(
    source: &S,
    time_unit: TimeUnit,
    chunk: DateRange,
    outcome: &mut FetchOutcome,
) {
    for day in chunk.days() {
        let day_range = DateRange::single_day(day);
        match source.fetch_range(time_unit, day_range) {
            Ok(rows) => outcome.rows.extend(rows),
            Err(err) => outcome.warnings.push(FetchWarning {
                scope: WarnScope::Day,
                range: day_range,
                message: err.to_string(),
            }),
        }
    }
}
