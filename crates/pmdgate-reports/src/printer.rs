//! Per-finding output used in verbose mode.

use std::io::{self, Write};

use log::info;
use pmdgate_core::{Classification, Finding, ReportKind, Severity};

/// Receives each finding of a classified report.
pub trait FindingPrinter {
    fn print(&mut self, finding: &Finding, severity: Severity) -> io::Result<()>;
}

/// Print all warnings, then all failures, each in document order.
pub fn print_findings(
    classification: &Classification,
    printer: &mut dyn FindingPrinter,
) -> io::Result<()> {
    for (finding, severity) in classification.iter_for_printing() {
        printer.print(finding, severity)?;
    }
    Ok(())
}

/// Writes one line per finding in the report kind's format.
pub struct ReportPrinter<W: Write> {
    kind: ReportKind,
    out: W,
}

impl<W: Write> ReportPrinter<W> {
    pub fn new(kind: ReportKind, out: W) -> Self {
        Self { kind, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FindingPrinter for ReportPrinter<W> {
    fn print(&mut self, finding: &Finding, severity: Severity) -> io::Result<()> {
        writeln!(self.out, "{}", self.kind.format_finding(finding, severity.label()))
    }
}

/// Emits each finding as an info log record.
#[derive(Debug, Clone, Copy)]
pub struct LogPrinter {
    kind: ReportKind,
}

impl LogPrinter {
    pub fn new(kind: ReportKind) -> Self {
        Self { kind }
    }
}

impl FindingPrinter for LogPrinter {
    fn print(&mut self, finding: &Finding, severity: Severity) -> io::Result<()> {
        info!("{}", self.kind.format_finding(finding, severity.label()));
        Ok(())
    }
}
