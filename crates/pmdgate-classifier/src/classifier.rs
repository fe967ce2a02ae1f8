//! Single-pass scan-and-classify over an XML event stream.

use std::io::BufRead;

use log::{debug, trace};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use pmdgate_core::{Classification, Severity};

use crate::error::MalformedReportError;
use crate::extractor::{AttributeExtractor, ElementExtractor};

/// Classify every `element_name` element of `input` against `failure_threshold`.
///
/// Attributes only are captured; use [`StreamClassifier::with_extractor`] to
/// capture text as well.
pub fn classify<R: BufRead>(
    input: R,
    element_name: &str,
    failure_threshold: i32,
) -> Result<Classification, MalformedReportError> {
    StreamClassifier::new(element_name, failure_threshold).classify(input)
}

/// Partitions report elements into failures and warnings by priority.
#[derive(Debug, Clone)]
pub struct StreamClassifier<E = AttributeExtractor> {
    element_name: String,
    failure_threshold: i32,
    extractor: E,
}

impl StreamClassifier<AttributeExtractor> {
    pub fn new(element_name: impl Into<String>, failure_threshold: i32) -> Self {
        Self {
            element_name: element_name.into(),
            failure_threshold,
            extractor: AttributeExtractor,
        }
    }
}

impl<E: ElementExtractor> StreamClassifier<E> {
    /// Replace the extractor used to build findings.
    pub fn with_extractor<X: ElementExtractor>(self, extractor: X) -> StreamClassifier<X> {
        StreamClassifier {
            element_name: self.element_name,
            failure_threshold: self.failure_threshold,
            extractor,
        }
    }

    /// Read `input` to the end of the document and classify its findings.
    ///
    /// The input is only read; closing it stays with the caller.
    pub fn classify<R: BufRead>(&self, input: R) -> Result<Classification, MalformedReportError> {
        let mut reader = Reader::from_reader(input);
        let mut buf = Vec::new();
        let mut classification = Classification::default();

        let mut depth = 0usize;
        let mut seen_root = false;
        // Open matching elements whose text is being captured: (depth, bucket, index)
        let mut capturing: Vec<(usize, Severity, usize)> = Vec::new();

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|source| xml_error(&reader, source))?;

            match event {
                Event::Start(element) => {
                    enter_element(&reader, depth, &mut seen_root)?;
                    depth += 1;
                    if let Some((severity, index)) =
                        self.visit(&reader, &element, &mut classification)?
                    {
                        if self.extractor.captures_text() {
                            capturing.push((depth, severity, index));
                        }
                    }
                }
                Event::Empty(element) => {
                    enter_element(&reader, depth, &mut seen_root)?;
                    self.visit(&reader, &element, &mut classification)?;
                }
                Event::End(_) => {
                    if depth == 0 {
                        return Err(MalformedReportError::ContentOutsideRoot {
                            position: reader.buffer_position() as u64,
                        });
                    }
                    if capturing.last().is_some_and(|(open, _, _)| *open == depth) {
                        capturing.pop();
                    }
                    depth -= 1;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|source| xml_error(&reader, source))?;
                    capture_text(&reader, depth, &text, &capturing, &mut classification)?;
                }
                Event::CData(cdata) => {
                    let text = reader
                        .decoder()
                        .decode(&cdata)
                        .map_err(|source| xml_error(&reader, source))?;
                    capture_text(&reader, depth, &text, &capturing, &mut classification)?;
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions and doctypes
                _ => {}
            }
            buf.clear();
        }

        if depth > 0 {
            return Err(MalformedReportError::UnexpectedEof {
                open_elements: depth,
            });
        }
        if !seen_root {
            return Err(MalformedReportError::NoRootElement);
        }

        debug!(
            "Classified {} <{}> element(s): {} failure(s), {} warning(s)",
            classification.len(),
            self.element_name,
            classification.failure_count(),
            classification.warning_count()
        );
        Ok(classification)
    }

    /// Classify `element` if it matches, returning where it was stored.
    fn visit<R>(
        &self,
        reader: &Reader<R>,
        element: &BytesStart<'_>,
        classification: &mut Classification,
    ) -> Result<Option<(Severity, usize)>, MalformedReportError> {
        if element.name().as_ref() != self.element_name.as_bytes() {
            return Ok(None);
        }

        let decoder = reader.decoder();
        let mut attributes = Vec::new();
        for attribute in element.attributes() {
            let attribute = attribute.map_err(|e| xml_error(reader, e.into()))?;
            let key = decoder
                .decode(attribute.key.as_ref())
                .map_err(|source| xml_error(reader, source))?;
            let value = attribute
                .unescape_value()
                .map_err(|source| xml_error(reader, source))?;
            attributes.push((key.into_owned(), value.into_owned()));
        }

        let finding = self.extractor.extract(attributes);
        trace!("<{}> priority {}", self.element_name, finding.priority);
        Ok(Some(classification.push(finding, self.failure_threshold)))
    }
}

fn xml_error<R>(reader: &Reader<R>, source: quick_xml::Error) -> MalformedReportError {
    MalformedReportError::Xml {
        position: reader.buffer_position() as u64,
        source,
    }
}

/// A second top-level element is not a well-formed document.
fn enter_element<R>(
    reader: &Reader<R>,
    depth: usize,
    seen_root: &mut bool,
) -> Result<(), MalformedReportError> {
    if depth == 0 {
        if *seen_root {
            return Err(MalformedReportError::ContentOutsideRoot {
                position: reader.buffer_position() as u64,
            });
        }
        *seen_root = true;
    }
    Ok(())
}

fn capture_text<R>(
    reader: &Reader<R>,
    depth: usize,
    text: &str,
    capturing: &[(usize, Severity, usize)],
    classification: &mut Classification,
) -> Result<(), MalformedReportError> {
    if depth == 0 {
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err(MalformedReportError::ContentOutsideRoot {
            position: reader.buffer_position() as u64,
        });
    }

    if let Some(&(open, severity, index)) = capturing.last() {
        if open == depth {
            if let Some(finding) = classification.bucket_mut(severity).get_mut(index) {
                finding.push_text(text);
            }
        }
    }
    Ok(())
}
