//! Chunk planning for span-capped energy queries.
//!
//! The monitoring API rejects energy queries spanning more than 31 days, so an
//! arbitrary user range has to be partitioned before fetching. The plan is
//! deterministic: contiguous, non-overlapping, ascending sub-ranges whose
//! union is exactly the input range.

use chrono::Duration;

use crate::domain::DateRange;

/// Maximum date span (days, inclusive) the energy endpoint accepts per request.
pub const MAX_CHUNK_DAYS: i64 = 31;

/// Split an inclusive date range into ordered sub-ranges of at most
/// `max_days` days each.
///
/// An inverted range (`end < start`) produces an empty plan, not an error.
pub fn plan_chunks(range: DateRange, max_days: i64) -> Vec<DateRange> {
    let mut chunks = Vec::new();
    if max_days <= 0 {
        return chunks;
    }

    let mut current = range.start;
    while current <= range.end {
        let chunk_end = (current + Duration::days(max_days - 1)).min(range.end);
        chunks.push(DateRange::new(current, chunk_end));
        current = chunk_end + Duration::days(1);
    }
    chunks
}
