use std::sync::Arc;
use std::time::Instant;

use super::acquire::{acquire, ExtractedText, RawDocument};
use super::patterns::PatternFields;
use super::recognizer::Recognizer;
use super::structure::structure;
use crate::error::Result;
use crate::record::StructuredRecord;

/// Runs one document through acquisition, recognition, the pattern library
/// and the merge stage.
///
/// The recognizer is loaded once by the caller and shared; the pipeline
/// itself holds no per-call state and can serve concurrent extractions.
#[derive(Clone)]
pub struct ExtractionPipeline {
    recognizer: Arc<dyn Recognizer>,
}

impl ExtractionPipeline {
    pub fn new(recognizer: Arc<dyn Recognizer>) -> Self {
        Self { recognizer }
    }

    /// Extracts from bytes tagged with a filename-derived format such as `pdf`.
    pub fn extract(&self, data: &[u8], format: &str) -> Result<StructuredRecord> {
        self.extract_document(RawDocument::tagged(data, format)?)
    }

    pub fn extract_document(&self, document: RawDocument<'_>) -> Result<StructuredRecord> {
        let span = tracing::info_span!("extract", format = %document.format, bytes = document.data.len());
        let _enter = span.enter();
        let start = Instant::now();

        let text = acquire(document)?;
        let record = self.extract_text(&text)?;

        tracing::info!(
            fields = record.total(),
            names = record.name.len(),
            organizations = record.organization.len(),
            locations = record.location.len(),
            duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "extraction complete"
        );
        Ok(record)
    }

    /// Skips acquisition for text that is already in hand.
    pub fn extract_text(&self, text: &ExtractedText) -> Result<StructuredRecord> {
        let spans = self.recognizer.recognize(text)?;
        tracing::debug!(recognizer = self.recognizer.name(), spans = spans.len(), "recognized entities");

        let patterns = PatternFields::extract(text);
        tracing::debug!(matches = patterns.total(), "pattern extraction complete");

        Ok(structure(&spans, patterns))
    }
}

impl std::fmt::Debug for ExtractionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionPipeline")
            .field("recognizer", &self.recognizer.name())
            .finish()
    }
}
