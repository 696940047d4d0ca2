//! Per-session memoization of chunked fetch results.
//!
//! A fetch outcome is a pure function of `(time_unit, start, end)`, and
//! historical energy data for a closed past interval does not change
//! retroactively, so entries are kept for the whole session with no eviction.
//! Callers re-fetching a range that includes the current day should expect
//! the cached copy to be potentially incomplete.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::data::fetch::{EnergySource, FetchOutcome, fetch_energy_chunked};
use crate::domain::{DateRange, TimeUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    time_unit: TimeUnit,
    start: NaiveDate,
    end: NaiveDate,
}

impl CacheKey {
    fn new(time_unit: TimeUnit, range: DateRange) -> Self {
        Self {
            time_unit,
            start: range.start,
            end: range.end,
        }
    }
}

/// Unbounded per-session fetch cache.
#[derive(Debug, Default)]
pub struct FetchCache {
    entries: HashMap<CacheKey, FetchOutcome>,
}

impl FetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the memoized outcome for this request, fetching on first use.
    ///
    /// The cached warnings are replayed along with the rows so repeated
    /// requests report the same partial-data gaps.
    pub fn fetch<S: EnergySource>(
        &mut self,
        source: &S,
        time_unit: TimeUnit,
        range: DateRange,
    ) -> FetchOutcome {
        let key = CacheKey::new(time_unit, range);
        self.entries
            .entry(key)
            .or_insert_with(|| fetch_energy_chunked(source, time_unit, range))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::NaiveDate;

    use super::*;
    use crate::domain::SampleRow;
    use crate::error::AppError;

    struct CountingSource {
        calls: RefCell<usize>,
    }

    impl EnergySource for CountingSource {
        fn fetch_range(
            &self,
            _time_unit: TimeUnit,
            range: DateRange,
        ) -> Result<Vec<SampleRow>, AppError> {
            *self.calls.borrow_mut() += 1;
            Ok(range
                .days()
                .map(|d| SampleRow::new(d.and_hms_opt(12, 0, 0).unwrap(), 50.0))
                .collect())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn repeated_request_hits_the_cache() {
        let source = CountingSource { calls: RefCell::new(0) };
        let mut cache = FetchCache::new();
        let range = DateRange::new(date(2023, 1, 1), date(2023, 1, 10));

        let first = cache.fetch(&source, TimeUnit::QuarterOfAnHour, range);
        let calls_after_first = *source.calls.borrow();
        let second = cache.fetch(&source, TimeUnit::QuarterOfAnHour, range);

        assert_eq!(first.rows, second.rows);
        assert_eq!(*source.calls.borrow(), calls_after_first);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn different_granularity_is_a_different_entry() {
        let source = CountingSource { calls: RefCell::new(0) };
        let mut cache = FetchCache::new();
        let range = DateRange::new(date(2023, 1, 1), date(2023, 1, 10));

        cache.fetch(&source, TimeUnit::QuarterOfAnHour, range);
        cache.fetch(&source, TimeUnit::Day, range);

        assert_eq!(cache.len(), 2);
    }
}
