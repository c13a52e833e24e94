use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    PlainText,
}

impl DocumentFormat {
    /// Accepts `pdf`/`txt` in any case, with or without a leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::PlainText),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::PlainText => "txt",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::PlainText => "TXT file",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s)
            .ok_or_else(|| Error::UnsupportedFormat(s.trim_start_matches('.').to_lowercase()))
    }
}

/// Uploaded bytes plus the format they claim to be.
#[derive(Debug, Clone, Copy)]
pub struct RawDocument<'a> {
    pub data: &'a [u8],
    pub format: DocumentFormat,
}

impl<'a> RawDocument<'a> {
    #[must_use]
    pub const fn new(data: &'a [u8], format: DocumentFormat) -> Self {
        Self { data, format }
    }

    pub fn tagged(data: &'a [u8], tag: &str) -> Result<Self> {
        Ok(Self::new(data, tag.parse()?))
    }
}

/// Trimmed document text. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn new(raw: &str, format: DocumentFormat) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyContent(format));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ExtractedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for ExtractedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

/// Turns the bytes of one format into untrimmed text.
pub trait Acquirer: Send + Sync {
    fn format(&self) -> DocumentFormat;

    fn raw_text(&self, data: &[u8]) -> Result<String>;

    fn acquire(&self, data: &[u8]) -> Result<ExtractedText> {
        let raw = self.raw_text(data)?;
        ExtractedText::new(&raw, self.format())
    }
}

pub struct PlainTextAcquirer;

impl Acquirer for PlainTextAcquirer {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::PlainText
    }

    fn raw_text(&self, data: &[u8]) -> Result<String> {
        match std::str::from_utf8(data) {
            Ok(text) => Ok(text.to_string()),
            Err(e) => {
                tracing::debug!(error = %e, "input is not UTF-8, decoding as Latin-1");
                Ok(decode_latin1(data))
            }
        }
    }
}

pub struct PdfAcquirer;

impl Acquirer for PdfAcquirer {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn raw_text(&self, data: &[u8]) -> Result<String> {
        // pdf-extract panics on some structurally valid but broken documents.
        let pages = match catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(data)
        })) {
            Ok(Ok(pages)) => pages,
            Ok(Err(e)) => return Err(Error::acquisition(DocumentFormat::Pdf, e)),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!(%message, "PDF text extraction panicked");
                return Err(Error::acquisition(DocumentFormat::Pdf, message));
            }
        };

        let blank = pages.iter().filter(|p| p.trim().is_empty()).count();
        tracing::debug!(pages = pages.len(), blank, "extracted PDF text layer");

        Ok(pages.join("\n"))
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "malformed document".to_string()
    }
}

/// Every byte maps to the code point of the same value.
fn decode_latin1(data: &[u8]) -> String {
    data.iter().copied().map(char::from).collect()
}

pub fn acquirer_for(format: DocumentFormat) -> &'static dyn Acquirer {
    match format {
        DocumentFormat::Pdf => &PdfAcquirer,
        DocumentFormat::PlainText => &PlainTextAcquirer,
    }
}

pub fn acquire(document: RawDocument<'_>) -> Result<ExtractedText> {
    let text = acquirer_for(document.format).acquire(document.data)?;
    tracing::debug!(
        format = %document.format,
        bytes = document.data.len(),
        chars = text.chars().count(),
        "acquired document text"
    );
    Ok(text)
}
