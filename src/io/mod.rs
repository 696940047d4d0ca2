//! Output helpers.
//!
//! - normalized dataset export to CSV (`export`)

pub mod export;

pub use export::*;
