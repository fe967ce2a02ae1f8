//! Streaming classifier for static-analysis XML reports.
//!
//! The classifier makes one pass over an XML event stream, turns every
//! element with the configured name into a [`Finding`](pmdgate_core::Finding)
//! and partitions the findings into failures and warnings.

mod classifier;
mod error;
mod extractor;

pub use classifier::{classify, StreamClassifier};
pub use error::MalformedReportError;
pub use extractor::{AttributeExtractor, ElementExtractor, TextExtractor};
