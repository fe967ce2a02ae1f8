use anyhow::Result;
use std::collections::HashMap;
use std::process::ExitCode;

use pmdgate_reports::{FindingPrinter, LogPrinter, ReportPrinter};

use crate::check::{CheckError, CheckOutcome, run_check};
use crate::cli::args::Args;
use crate::config::PmdgateConfig;

/// Process exit status of a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// The check passed or did not apply.
    Success,
    /// Gated failures were found, or the report is missing.
    Failure,
    /// The report could not be read.
    Fault,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::SUCCESS,
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Fault => ExitCode::from(2),
        }
    }
}

pub struct RootCommand;

impl RootCommand {
    pub fn execute(args: &Args) -> Result<ExitStatus> {
        if args.generate_config {
            println!("{}", PmdgateConfig::generate_default_config());
            return Ok(ExitStatus::Success);
        }

        let env_vars: HashMap<String, String> = std::env::vars().collect();
        let config = PmdgateConfig::load_with_precedence(args.config.as_deref(), args, &env_vars)?;
        let options = config.to_options();
        log::debug!("Check options: {:?}", options);

        let stdout = std::io::stdout();
        let mut printer: Box<dyn FindingPrinter> = if args.json {
            Box::new(LogPrinter::new(options.report))
        } else {
            Box::new(ReportPrinter::new(options.report, stdout.lock()))
        };

        let outcome = match run_check(&options, printer.as_mut()) {
            Ok(outcome) => outcome,
            Err(e @ CheckError::MissingReport { .. }) => {
                eprintln!("❌ {}", e);
                return Ok(ExitStatus::Failure);
            }
            Err(e) => {
                eprintln!("❌ {:#}", anyhow::Error::new(e));
                return Ok(ExitStatus::Fault);
            }
        };
        drop(printer);

        if args.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }

        match outcome {
            CheckOutcome::Failed { verdict, .. } => {
                eprintln!("❌ {}", verdict.message);
                Ok(ExitStatus::Failure)
            }
            CheckOutcome::Passed { .. } | CheckOutcome::Skipped { .. } => Ok(ExitStatus::Success),
        }
    }
}
