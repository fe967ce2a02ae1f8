//! Failure/warning partition of a report.

use serde::{Deserialize, Serialize};

use crate::finding::Finding;

/// Bucket a finding was classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Failure,
    Warning,
}

impl Severity {
    /// Label used when printing a finding.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Failure => "Failure",
            Severity::Warning => "Warning",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Findings of one report, each bucket in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub failures: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

impl Classification {
    /// Classify `finding` against `threshold` and append it to its bucket.
    ///
    /// Returns the bucket and the index the finding was stored at.
    pub fn push(&mut self, finding: Finding, threshold: i32) -> (Severity, usize) {
        let severity = if finding.priority.is_failure(threshold) {
            Severity::Failure
        } else {
            Severity::Warning
        };
        let bucket = self.bucket_mut(severity);
        bucket.push(finding);
        (severity, bucket.len() - 1)
    }

    pub fn bucket_mut(&mut self, severity: Severity) -> &mut Vec<Finding> {
        match severity {
            Severity::Failure => &mut self.failures,
            Severity::Warning => &mut self.warnings,
        }
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Total number of classified findings.
    pub fn len(&self) -> usize {
        self.failures.len() + self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate warnings then failures, each in document order.
    pub fn iter_for_printing(&self) -> impl Iterator<Item = (&Finding, Severity)> {
        self.warnings
            .iter()
            .map(|f| (f, Severity::Warning))
            .chain(self.failures.iter().map(|f| (f, Severity::Failure)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(rule: &str, priority: &str) -> Finding {
        Finding::from_attributes([("rule", rule), ("priority", priority)])
    }

    #[test]
    fn test_push_partitions_by_threshold() {
        let mut classification = Classification::default();

        assert_eq!(classification.push(finding("A", "3"), 3), (Severity::Failure, 0));
        assert_eq!(classification.push(finding("B", "4"), 3), (Severity::Warning, 0));
        assert_eq!(classification.push(finding("C", "x"), 3), (Severity::Failure, 1));

        assert_eq!(classification.failure_count(), 2);
        assert_eq!(classification.warning_count(), 1);
        assert_eq!(classification.len(), 3);
    }

    #[test]
    fn test_iter_for_printing_puts_warnings_first() {
        let mut classification = Classification::default();
        classification.push(finding("F1", "1"), 2);
        classification.push(finding("W1", "5"), 2);
        classification.push(finding("F2", "2"), 2);
        classification.push(finding("W2", "3"), 2);

        let order: Vec<(&str, Severity)> = classification
            .iter_for_printing()
            .map(|(f, s)| (f.attribute("rule").unwrap_or_default(), s))
            .collect();

        assert_eq!(
            order,
            vec![
                ("W1", Severity::Warning),
                ("W2", Severity::Warning),
                ("F1", Severity::Failure),
                ("F2", Severity::Failure),
            ]
        );
    }

    #[test]
    fn test_classification_json_shape() {
        let mut classification = Classification::default();
        classification.push(finding("A", "1"), 3);

        let json = serde_json::to_value(&classification).unwrap();
        assert_eq!(json["failures"][0]["attributes"]["rule"], "A");
        assert_eq!(json["failures"][0]["priority"]["known"], 1);
        assert!(json["warnings"].as_array().unwrap().is_empty());
    }
}
