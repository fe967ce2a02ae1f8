pub mod check;
pub mod cli;
pub mod config;

// Re-export core types for convenience
pub use pmdgate_core::{Classification, Finding, Priority, ReportKind, Severity, Verdict};
