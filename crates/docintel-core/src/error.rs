use thiserror::Error;

use crate::ingest::DocumentFormat;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unsupported file type: {0}. Supported types: pdf, txt")]
    UnsupportedFormat(String),

    #[error("{} contains no extractable text", .0.description())]
    EmptyContent(DocumentFormat),

    #[error("Failed to extract text from {}: {message}", .format.description())]
    AcquisitionFailure {
        format: DocumentFormat,
        message: String,
    },

    #[error("NER extraction failed: {0}")]
    RecognitionFailure(String),

    #[error("Failed to load NER model: {0}")]
    ModelLoad(String),
}

/// Which side of the request a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Client,
    Server,
}

impl Error {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedFormat(_) | Self::EmptyContent(_) | Self::AcquisitionFailure { .. } => {
                ErrorKind::Client
            }
            Self::RecognitionFailure(_) | Self::ModelLoad(_) => ErrorKind::Server,
        }
    }

    pub(crate) fn acquisition(format: DocumentFormat, err: impl std::fmt::Display) -> Self {
        Self::AcquisitionFailure {
            format,
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::UnsupportedFormat("docx".into()).kind(), ErrorKind::Client);
        assert_eq!(Error::EmptyContent(DocumentFormat::Pdf).kind(), ErrorKind::Client);
        assert_eq!(
            Error::acquisition(DocumentFormat::Pdf, "bad xref").kind(),
            ErrorKind::Client
        );
        assert_eq!(Error::RecognitionFailure("boom".into()).kind(), ErrorKind::Server);
        assert_eq!(Error::ModelLoad("missing".into()).kind(), ErrorKind::Server);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::UnsupportedFormat("docx".into()).to_string(),
            "Unsupported file type: docx. Supported types: pdf, txt"
        );
        assert_eq!(
            Error::EmptyContent(DocumentFormat::PlainText).to_string(),
            "TXT file contains no extractable text"
        );
    }
}
