//! The extraction pipeline: text acquisition, entity recognition, the
//! pattern library and the merge stage.

mod acquire;
#[cfg(feature = "onnx-ner")]
mod onnx;
pub mod patterns;
mod pipeline;
mod recognizer;
mod structure;

pub use acquire::{
    acquire, acquirer_for, Acquirer, DocumentFormat, ExtractedText, PdfAcquirer,
    PlainTextAcquirer, RawDocument,
};
#[cfg(feature = "onnx-ner")]
pub use onnx::OnnxRecognizer;
pub use patterns::{PatternExtractor, PatternFields, EXTRACTORS};
pub use pipeline::ExtractionPipeline;
pub use recognizer::{
    aggregate_simple, load_recognizer, truncate_input, DisabledRecognizer, EntityField,
    Recognizer, Span, TokenTag, TRUNCATION_MARKER,
};
pub use structure::structure;
