//! Finding definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Attribute holding the numeric priority of a finding.
pub const PRIORITY_ATTRIBUTE: &str = "priority";

/// Priority of a finding as read from its report element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Known(i32),
    /// The attribute was missing or not an integer.
    Unknown,
}

impl Priority {
    /// Parse a raw attribute value.
    ///
    /// Accepts an optional sign followed by decimal digits. Surrounding
    /// whitespace and out-of-range values yield `Unknown`.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::parse::<i32>) {
            Some(Ok(value)) => Priority::Known(value),
            _ => Priority::Unknown,
        }
    }

    /// Whether a finding with this priority fails against `threshold`.
    ///
    /// The comparison is inclusive, and an unknown priority always fails.
    #[must_use]
    pub fn is_failure(&self, threshold: i32) -> bool {
        match self {
            Priority::Known(value) => *value <= threshold,
            Priority::Unknown => true,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Known(value) => write!(f, "{}", value),
            Priority::Unknown => write!(f, "unknown"),
        }
    }
}

/// One violation occurrence captured from a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Attributes of the matching element, keyed by attribute name.
    pub attributes: BTreeMap<String, String>,
    /// Text content directly inside the element, when captured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub priority: Priority,
}

impl Finding {
    /// Build a finding from element attributes, deriving its priority.
    pub fn from_attributes<I, K, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let attributes: BTreeMap<String, String> = attributes
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let priority = Priority::parse(attributes.get(PRIORITY_ATTRIBUTE).map(String::as_str));

        Self {
            attributes,
            text: None,
            priority,
        }
    }

    /// Get an attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Append text found inside the element. Blank fragments are ignored.
    pub fn push_text(&mut self, fragment: &str) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return;
        }
        match &mut self.text {
            Some(text) => {
                text.push(' ');
                text.push_str(fragment);
            }
            None => self.text = Some(fragment.to_string()),
        }
    }
}
