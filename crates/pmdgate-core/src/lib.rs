//! Core types for the pmdgate violation check.
//!
//! This crate provides the data shared by every pmdgate component:
//! - Findings and their priority (Finding, Priority)
//! - The failure/warning partition of a report (Classification, Severity)
//! - Pass/fail verdicts (Verdict)
//! - Report kinds and their typed finding views (ReportKind)

mod classification;
mod finding;
mod report_kind;
mod verdict;

pub use classification::{Classification, Severity};
pub use finding::{Finding, Priority, PRIORITY_ATTRIBUTE};
pub use report_kind::{CpdDuplication, PmdViolation, ReportKind};
pub use verdict::Verdict;
