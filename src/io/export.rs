//! Export the normalized dataset to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts; values stay in raw Wh so re-imports need no unit bookkeeping.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::SampleRow;
use crate::error::AppError;

/// Write every sample row to a CSV file.
pub fn write_dataset_csv(path: &Path, rows: &[SampleRow]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "timestamp,date,year,month,day,hour,hour_rounded,value_wh")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for r in rows {
        writeln!(
            file,
            "{},{},{},{},{},{:.4},{},{}",
            r.timestamp, r.date, r.year, r.month, r.day, r.hour, r.hour_rounded, r.value
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
