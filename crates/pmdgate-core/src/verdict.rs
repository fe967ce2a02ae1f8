//! Pass/fail verdict of a check.

use serde::{Deserialize, Serialize};

/// Outcome of summarizing a classified report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub failure_count: usize,
    pub warning_count: usize,
    pub should_fail: bool,
    /// One-line summary; empty when the report had no findings.
    pub message: String,
}

impl Verdict {
    /// Apply the gating toggle. A disabled gate never fails.
    #[must_use]
    pub fn with_gating(mut self, enabled: bool) -> Self {
        self.should_fail = self.should_fail && enabled;
        self
    }
}
