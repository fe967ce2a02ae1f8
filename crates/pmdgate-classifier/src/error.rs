use thiserror::Error;

/// A report that could not be read to the end as a well-formed document.
#[derive(Error, Debug)]
pub enum MalformedReportError {
    #[error("XML error at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Unexpected end of document with {open_elements} unclosed element(s)")]
    UnexpectedEof { open_elements: usize },

    #[error("Document has no root element")]
    NoRootElement,

    #[error("Content outside the root element at byte {position}")]
    ContentOutsideRoot { position: u64 },
}
