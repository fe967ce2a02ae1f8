use clap::Parser;
use std::path::PathBuf;

use pmdgate_core::ReportKind;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None
)]
pub struct Args {
    /// Report kind to check: pmd or cpd
    #[arg(short, long)]
    pub report: Option<ReportKind>,

    /// Directory containing the report
    #[arg(short, long)]
    pub target_dir: Option<PathBuf>,

    /// Path of the report, overriding --target-dir
    #[arg(long)]
    pub report_file: Option<PathBuf>,

    /// XML element representing one finding
    #[arg(long)]
    pub element: Option<String>,

    /// Noun used for failures in the summary message
    #[arg(long)]
    pub noun: Option<String>,

    /// Highest priority still counted as a failure
    #[arg(short = 'p', long, allow_hyphen_values = true)]
    pub failure_priority: Option<i32>,

    /// Report failures without failing the build
    #[arg(long, overrides_with = "fail_on_violation")]
    pub no_fail: bool,

    /// Fail the build on failures, even if a config file disabled it
    #[arg(long, overrides_with = "no_fail")]
    pub fail_on_violation: bool,

    /// Print every finding
    #[arg(short, long, overrides_with = "no_verbose")]
    pub verbose: bool,

    /// Do not print findings, even if a config file enabled it
    #[arg(long, overrides_with = "verbose")]
    pub no_verbose: bool,

    /// Project language; the check only applies to java
    #[arg(long)]
    pub language: Option<String>,

    /// Project source directory; the check is skipped when it is missing
    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub generate_config: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(long)]
    pub debug: bool,
}
