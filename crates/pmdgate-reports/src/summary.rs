use std::path::{Path, PathBuf};

use pmdgate_core::Verdict;

/// Build the verdict and summary message for a classified report.
///
/// `noun` names one failure ("violation", "duplication") and is pluralized
/// with a trailing `s`. The message is empty when there are no findings.
pub fn summarize(
    failure_count: usize,
    warning_count: usize,
    noun: &str,
    report_location: &Path,
) -> Verdict {
    let mut message = String::new();

    if failure_count > 0 || warning_count > 0 {
        if failure_count > 0 {
            message.push_str(&format!(
                "You have {} {}{}",
                failure_count,
                noun,
                plural_suffix(failure_count)
            ));
        }

        if warning_count > 0 {
            if failure_count > 0 {
                message.push_str(" and ");
            } else {
                message.push_str("You have ");
            }
            message.push_str(&format!(
                "{} warning{}",
                warning_count,
                plural_suffix(warning_count)
            ));
        }

        message.push_str(&format!(
            ". For more details see:{}",
            absolute_path(report_location).display()
        ));
    }

    Verdict {
        failure_count,
        warning_count,
        should_fail: failure_count > 0,
        message,
    }
}

fn plural_suffix(count: usize) -> &'static str {
    if count > 1 { "s" } else { "" }
}

/// Lexically absolute form of `path`; falls back to `path` as given.
fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
