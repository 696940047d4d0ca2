//! `se-energy` library crate.
//!
//! The binary (`se`) is a thin wrapper around this library so that:
//!
//! - the fetch pipeline is testable without spawning processes
//! - modules are reusable (e.g., future dashboards, schedulers, notebooks)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
