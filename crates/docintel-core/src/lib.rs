#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod record;

pub use config::RecognizerConfig;
pub use error::{Error, ErrorKind, Result};
pub use export::{render, ExportFormat};
pub use ingest::{
    load_recognizer, DisabledRecognizer, DocumentFormat, ExtractionPipeline, RawDocument,
    Recognizer, Span,
};
pub use record::{FieldList, StructuredRecord};
