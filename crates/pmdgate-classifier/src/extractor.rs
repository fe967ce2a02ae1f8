//! Element extractors turn a matching element into a finding.

use pmdgate_core::{Finding, ReportKind};

/// Builds findings from the attributes of matching elements.
pub trait ElementExtractor {
    /// Build a finding from the element's attributes in document order.
    fn extract(&self, attributes: Vec<(String, String)>) -> Finding {
        Finding::from_attributes(attributes)
    }

    /// Whether text directly inside the element belongs to the finding.
    fn captures_text(&self) -> bool {
        false
    }
}

/// Captures attributes only.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeExtractor;

impl ElementExtractor for AttributeExtractor {}

/// Captures attributes and the element's text content.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExtractor;

impl ElementExtractor for TextExtractor {
    fn captures_text(&self) -> bool {
        true
    }
}

impl ElementExtractor for ReportKind {
    fn captures_text(&self) -> bool {
        ReportKind::captures_text(self)
    }
}
