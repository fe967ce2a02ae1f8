//! Report kinds and typed views over their findings.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::finding::Finding;

/// Static-analysis report formats the check understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// PMD rule violations.
    #[default]
    Pmd,
    /// CPD copy/paste duplications.
    Cpd,
}

impl ReportKind {
    /// File name the analysis tool writes into the target directory.
    #[must_use]
    pub fn default_file_name(&self) -> &'static str {
        match self {
            ReportKind::Pmd => "pmd.xml",
            ReportKind::Cpd => "cpd.xml",
        }
    }

    /// Element representing one finding.
    #[must_use]
    pub fn element_name(&self) -> &'static str {
        match self {
            ReportKind::Pmd => "violation",
            ReportKind::Cpd => "duplication",
        }
    }

    /// Noun used in the summary message.
    #[must_use]
    pub fn noun(&self) -> &'static str {
        match self {
            ReportKind::Pmd => "violation",
            ReportKind::Cpd => "duplication",
        }
    }

    /// Highest priority still counted as a failure.
    #[must_use]
    pub fn default_failure_priority(&self) -> i32 {
        match self {
            ReportKind::Pmd => 5,
            ReportKind::Cpd => 10,
        }
    }

    /// Whether findings of this kind carry a message as element text.
    #[must_use]
    pub fn captures_text(&self) -> bool {
        matches!(self, ReportKind::Pmd)
    }

    #[must_use]
    pub fn tool_name(&self) -> &'static str {
        match self {
            ReportKind::Pmd => "PMD",
            ReportKind::Cpd => "CPD",
        }
    }

    /// Render one finding as a single output line.
    #[must_use]
    pub fn format_finding(&self, finding: &Finding, severity_label: &str) -> String {
        match self {
            ReportKind::Pmd => {
                let v = PmdViolation::new(finding);
                format!(
                    "PMD {}: {}:{} Rule:{} Priority:{} {}.",
                    severity_label,
                    v.class().unwrap_or_default(),
                    v.begin_line().unwrap_or_default(),
                    v.rule().unwrap_or_default(),
                    v.priority().unwrap_or_default(),
                    v.message().unwrap_or_default(),
                )
            }
            ReportKind::Cpd => {
                let d = CpdDuplication::new(finding);
                format!(
                    "CPD {}: Found {} lines of duplicated code.",
                    severity_label,
                    d.lines().unwrap_or_default()
                )
            }
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::Pmd => write!(f, "pmd"),
            ReportKind::Cpd => write!(f, "cpd"),
        }
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pmd" => Ok(ReportKind::Pmd),
            "cpd" => Ok(ReportKind::Cpd),
            other => Err(format!("Unknown report kind: {}", other)),
        }
    }
}

/// A PMD `<violation>` finding.
#[derive(Debug, Clone, Copy)]
pub struct PmdViolation<'a> {
    finding: &'a Finding,
}

impl<'a> PmdViolation<'a> {
    pub fn new(finding: &'a Finding) -> Self {
        Self { finding }
    }

    pub fn rule(&self) -> Option<&'a str> {
        self.finding.attribute("rule")
    }

    pub fn class(&self) -> Option<&'a str> {
        self.finding.attribute("class")
    }

    /// Falls back to the `line` attribute written by older PMD versions.
    pub fn begin_line(&self) -> Option<&'a str> {
        self.finding
            .attribute("beginline")
            .or_else(|| self.finding.attribute("line"))
    }

    /// Raw priority attribute as written in the report.
    pub fn priority(&self) -> Option<&'a str> {
        self.finding.attribute("priority")
    }

    pub fn message(&self) -> Option<&'a str> {
        self.finding.text.as_deref()
    }
}

/// A CPD `<duplication>` finding.
#[derive(Debug, Clone, Copy)]
pub struct CpdDuplication<'a> {
    finding: &'a Finding,
}

impl<'a> CpdDuplication<'a> {
    pub fn new(finding: &'a Finding) -> Self {
        Self { finding }
    }

    pub fn lines(&self) -> Option<&'a str> {
        self.finding.attribute("lines")
    }
}
