//! Boundary to the document extraction step.
//!
//! Turning an uploaded document into a [`ParseResult`] (PDF text extraction,
//! AI-assisted or heuristic parsing) happens outside this crate. Anything
//! that can do it implements [`Extractor`].

use crate::{Error, ParseResult, Result};

/// Produces a parse result from raw document bytes
pub trait Extractor {
    fn extract(&self, document: &[u8]) -> Result<ParseResult>;
}

/// Accepts documents that are already an extracted result in JSON form
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonResultExtractor;

impl Extractor for JsonResultExtractor {
    fn extract(&self, document: &[u8]) -> Result<ParseResult> {
        if document.iter().all(u8::is_ascii_whitespace) {
            return Err(Error::Extraction("Document is empty".into()));
        }

        let result = ParseResult::from_json(document)?;
        tracing::info!(
            "Extracted {} events and {} evaluations",
            result.events.len(),
            result.evaluations.len()
        );
        Ok(result)
    }
}
