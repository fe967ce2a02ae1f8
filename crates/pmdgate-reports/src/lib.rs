//! Report output for the pmdgate violation check.
//!
//! This crate provides:
//! - The verdict and one-line summary message of a check
//! - Finding printers used in verbose mode

pub mod printer;
pub mod summary;

pub use printer::{print_findings, FindingPrinter, LogPrinter, ReportPrinter};
pub use summary::summarize;
