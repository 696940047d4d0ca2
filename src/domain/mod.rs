//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input configuration enums (`TimeUnit`, `EnergyUnit`)
//! - date-range and chunk types (`DateRange`)
//! - normalized energy readings (`SampleRow`)
//! - fetch warnings and run configuration (`FetchWarning`, `ReportConfig`)

pub mod types;

pub use types::*;
