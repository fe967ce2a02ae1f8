//! The build gate: locate a report, classify it and decide pass or fail.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;
use thiserror::Error;

use pmdgate_classifier::{MalformedReportError, StreamClassifier};
use pmdgate_core::{Classification, ReportKind, Verdict};
use pmdgate_reports::{FindingPrinter, print_findings, summarize};

/// Options of one check run, with per-kind defaults already resolved.
///
/// With neither `language` nor `source_dir` set the check always runs.
/// `language` matches "java" ignoring case.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub report: ReportKind,
    pub report_path: PathBuf,
    pub element: String,
    pub noun: String,
    pub failure_priority: i32,
    pub gating_enabled: bool,
    pub verbose: bool,
    pub language: Option<String>,
    pub source_dir: Option<PathBuf>,
}

impl CheckOptions {
    /// Options for `kind` reading the report at `report_path`.
    pub fn for_report(kind: ReportKind, report_path: impl Into<PathBuf>) -> Self {
        Self {
            report: kind,
            report_path: report_path.into(),
            element: kind.element_name().to_string(),
            noun: kind.noun().to_string(),
            failure_priority: kind.default_failure_priority(),
            gating_enabled: true,
            verbose: false,
            language: None,
            source_dir: None,
        }
    }

    /// Why the check does not apply to this project, if it does not.
    pub fn skip_reason(&self) -> Option<String> {
        if let Some(ref language) = self.language {
            if !language.eq_ignore_ascii_case("java") {
                return Some(format!("project language is {}, not java", language));
            }
        }
        if let Some(ref source_dir) = self.source_dir {
            if !source_dir.exists() {
                return Some(format!(
                    "source directory {} does not exist",
                    source_dir.display()
                ));
            }
        }
        None
    }
}

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Unable to perform check, unable to find {}", .path.display())]
    MissingReport { path: PathBuf },

    #[error("Unable to read {tool} results xml: {}", .path.display())]
    UnreadableReport {
        tool: &'static str,
        path: PathBuf,
        #[source]
        source: ReportReadError,
    },

    #[error("Failed to print findings: {0}")]
    Output(#[source] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ReportReadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Malformed(#[from] MalformedReportError),
}

/// Result of a check that ran to completion.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CheckOutcome {
    /// The check does not apply to this project.
    Skipped { reason: String },
    Passed {
        verdict: Verdict,
        classification: Classification,
    },
    /// Gated failures were found.
    Failed {
        verdict: Verdict,
        classification: Classification,
    },
}

impl CheckOutcome {
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            CheckOutcome::Skipped { .. } => None,
            CheckOutcome::Passed { verdict, .. } | CheckOutcome::Failed { verdict, .. } => {
                Some(verdict)
            }
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CheckOutcome::Failed { .. })
    }
}

/// Run the check described by `options`.
///
/// When `options.verbose` is set every finding is handed to `printer`,
/// warnings first.
pub fn run_check(
    options: &CheckOptions,
    printer: &mut dyn FindingPrinter,
) -> Result<CheckOutcome, CheckError> {
    if let Some(reason) = options.skip_reason() {
        debug!("Skipping {} check: {}", options.report.tool_name(), reason);
        return Ok(CheckOutcome::Skipped { reason });
    }

    let path = &options.report_path;
    if !path.exists() {
        return Err(CheckError::MissingReport { path: path.clone() });
    }

    let classification = read_report(options, path).map_err(|source| {
        CheckError::UnreadableReport {
            tool: options.report.tool_name(),
            path: std::path::absolute(path).unwrap_or_else(|_| path.clone()),
            source,
        }
    })?;

    if options.verbose {
        print_findings(&classification, printer).map_err(CheckError::Output)?;
    }

    let verdict = summarize(
        classification.failure_count(),
        classification.warning_count(),
        &options.noun,
        path,
    )
    .with_gating(options.gating_enabled);

    if verdict.should_fail {
        Ok(CheckOutcome::Failed {
            verdict,
            classification,
        })
    } else {
        if !verdict.message.is_empty() {
            info!("{}", verdict.message);
        }
        Ok(CheckOutcome::Passed {
            verdict,
            classification,
        })
    }
}

/// The file is closed when this returns, on success or error.
fn read_report(options: &CheckOptions, path: &Path) -> Result<Classification, ReportReadError> {
    let reader = BufReader::new(File::open(path)?);
    let classifier = StreamClassifier::new(options.element.as_str(), options.failure_priority)
        .with_extractor(options.report);
    Ok(classifier.classify(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_report_defaults() {
        let options = CheckOptions::for_report(ReportKind::Pmd, "target/pmd.xml");
        assert_eq!(options.element, "violation");
        assert_eq!(options.noun, "violation");
        assert_eq!(options.failure_priority, 5);
        assert!(options.gating_enabled);
        assert!(!options.verbose);
    }

    #[test]
    fn test_skip_reason() {
        let mut options = CheckOptions::for_report(ReportKind::Pmd, "target/pmd.xml");
        assert_eq!(options.skip_reason(), None);

        options.language = Some("Java".to_string());
        assert_eq!(options.skip_reason(), None);

        options.language = Some("kotlin".to_string());
        assert_eq!(
            options.skip_reason().as_deref(),
            Some("project language is kotlin, not java")
        );

        options.language = None;
        options.source_dir = Some(PathBuf::from("/definitely/not/here/src/main/java"));
        assert!(options.skip_reason().unwrap().contains("does not exist"));
    }

    #[test]
    fn test_missing_report_message() {
        let err = CheckError::MissingReport {
            path: PathBuf::from("target/pmd.xml"),
        };
        assert_eq!(
            err.to_string(),
            "Unable to perform check, unable to find target/pmd.xml"
        );
    }
}
