use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::RecognizerConfig;
use crate::error::{Error, Result};

/// Appended to input cut at the character limit.
pub const TRUNCATION_MARKER: &str = "...";

/// A class-tagged piece of text found by a recognizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// The model's own label, e.g. `PER` or `MISC`.
    pub label: String,
    pub text: String,
}

impl Span {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }

    pub fn field(&self) -> Option<EntityField> {
        EntityField::from_label(&self.label)
    }
}

/// Record fields a recognized span can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityField {
    Name,
    Organization,
    Location,
}

impl EntityField {
    /// Labels without a field (`MISC` and anything unknown) map to `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_uppercase().as_str() {
            "PER" | "PERSON" => Some(Self::Name),
            "ORG" | "ORGANIZATION" => Some(Self::Organization),
            "LOC" | "LOCATION" | "GPE" => Some(Self::Location),
            _ => None,
        }
    }
}

pub trait Recognizer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Input beyond this many characters is never seen by the model.
    fn max_chars(&self) -> usize {
        RecognizerConfig::DEFAULT_MAX_CHARS
    }

    /// Runs the model on already-truncated input.
    fn infer(&self, text: &str) -> Result<Vec<Span>>;

    fn recognize(&self, text: &str) -> Result<Vec<Span>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let input = truncate_input(text, self.max_chars());
        if let Cow::Owned(_) = input {
            tracing::debug!(
                recognizer = self.name(),
                max_chars = self.max_chars(),
                "truncated recognizer input"
            );
        }

        self.infer(&input)
    }
}

/// Keeps the first `max_chars` characters, marking the cut with [`TRUNCATION_MARKER`].
pub fn truncate_input(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}{TRUNCATION_MARKER}", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}

/// The argmax label of one token and the byte range it covers in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTag {
    pub tag: String,
    pub start: usize,
    pub end: usize,
}

impl TokenTag {
    pub fn new(tag: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            tag: tag.into(),
            start,
            end,
        }
    }
}

/// Splits `B-PER` into `(true, "PER")`; untagged labels such as `O` count as inside.
fn split_tag(tag: &str) -> (bool, &str) {
    if let Some(class) = tag.strip_prefix("B-") {
        (true, class)
    } else if let Some(class) = tag.strip_prefix("I-") {
        (false, class)
    } else {
        (false, tag)
    }
}

/// "Simple" aggregation: consecutive tokens of one class form a span unless a
/// `B-` tag starts a new one. `O` spans are discarded. The span text is the
/// input slice from its first token's start to its last token's end.
pub fn aggregate_simple(text: &str, tokens: &[TokenTag]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut current: Option<(&str, usize, usize)> = None;

    for token in tokens {
        let (begins, class) = split_tag(&token.tag);
        match current {
            Some((open, start, _)) if open == class && !begins => {
                current = Some((open, start, token.end));
            }
            _ => {
                if let Some(done) = current.take() {
                    push_span(&mut spans, text, done);
                }
                current = Some((class, token.start, token.end));
            }
        }
    }
    if let Some(done) = current {
        push_span(&mut spans, text, done);
    }

    spans
}

fn push_span(spans: &mut Vec<Span>, text: &str, (class, start, end): (&str, usize, usize)) {
    if class == "O" {
        return;
    }
    if let Some(surface) = text.get(start..end) {
        spans.push(Span::new(class, surface));
    }
}

/// Finds nothing. For runs where the operator has opted out of the model.
pub struct DisabledRecognizer;

impl Recognizer for DisabledRecognizer {
    fn name(&self) -> &'static str {
        "disabled"
    }

    fn infer(&self, _text: &str) -> Result<Vec<Span>> {
        Ok(Vec::new())
    }
}

/// Loads the model-backed recognizer described by `config`.
#[cfg(feature = "onnx-ner")]
pub fn load_recognizer(config: &RecognizerConfig) -> Result<Arc<dyn Recognizer>> {
    Ok(Arc::new(super::onnx::OnnxRecognizer::load(config)?))
}

/// Loads the model-backed recognizer described by `config`.
#[cfg(not(feature = "onnx-ner"))]
pub fn load_recognizer(config: &RecognizerConfig) -> Result<Arc<dyn Recognizer>> {
    Err(Error::ModelLoad(format!(
        "cannot load {}: built without the onnx-ner feature",
        config.model_dir.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingRecognizer {
        seen: Mutex<Vec<String>>,
    }

    impl Recognizer for RecordingRecognizer {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn infer(&self, text: &str) -> Result<Vec<Span>> {
            self.seen.lock().unwrap().push(text.to_string());
            Ok(vec![Span::new("PER", "Ada")])
        }
    }

    fn recording() -> RecordingRecognizer {
        RecordingRecognizer {
            seen: Mutex::new(Vec::new()),
        }
    }

    #[test]
    fn test_label_table() {
        assert_eq!(EntityField::from_label("PER"), Some(EntityField::Name));
        assert_eq!(EntityField::from_label("person"), Some(EntityField::Name));
        assert_eq!(EntityField::from_label("ORG"), Some(EntityField::Organization));
        assert_eq!(EntityField::from_label("Organization"), Some(EntityField::Organization));
        assert_eq!(EntityField::from_label("LOC"), Some(EntityField::Location));
        assert_eq!(EntityField::from_label("gpe"), Some(EntityField::Location));
        assert_eq!(EntityField::from_label("MISC"), None);
        assert_eq!(EntityField::from_label(""), None);
    }

    #[test]
    fn test_truncate_short_text_is_borrowed() {
        assert!(matches!(truncate_input("short", 1000), Cow::Borrowed("short")));
    }

    #[test]
    fn test_truncate_counts_characters() {
        let text = "é".repeat(1005);
        let cut = truncate_input(&text, 1000);
        assert_eq!(cut.chars().count(), 1003);
        assert!(cut.ends_with(TRUNCATION_MARKER));
        assert!(cut.starts_with("éé"));
    }

    #[test]
    fn test_truncate_exact_length_is_untouched() {
        let text = "a".repeat(1000);
        assert_eq!(truncate_input(&text, 1000), text.as_str());
    }

    #[test]
    fn test_recognize_truncates_before_inference() {
        let recognizer = recording();
        let text = "x".repeat(2500);
        recognizer.recognize(&text).unwrap();

        let seen = recognizer.seen.lock().unwrap();
        assert_eq!(seen[0].len(), 1000 + TRUNCATION_MARKER.len());
    }

    #[test]
    fn test_recognize_empty_skips_model() {
        let recognizer = recording();
        assert!(recognizer.recognize("").unwrap().is_empty());
        assert!(recognizer.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_aggregate_merges_subwords() {
        let text = "John Smithson works at Acme Corp in Paris";
        let tokens = [
            TokenTag::new("B-PER", 0, 4),
            TokenTag::new("I-PER", 5, 10),
            TokenTag::new("I-PER", 10, 13),
            TokenTag::new("O", 14, 19),
            TokenTag::new("O", 20, 22),
            TokenTag::new("B-ORG", 23, 27),
            TokenTag::new("I-ORG", 28, 32),
            TokenTag::new("O", 33, 35),
            TokenTag::new("B-LOC", 36, 41),
        ];

        let spans = aggregate_simple(text, &tokens);
        assert_eq!(
            spans,
            [
                Span::new("PER", "John Smithson"),
                Span::new("ORG", "Acme Corp"),
                Span::new("LOC", "Paris"),
            ]
        );
    }

    #[test]
    fn test_aggregate_b_tag_starts_new_span() {
        let text = "Alice Bob";
        let tokens = [TokenTag::new("B-PER", 0, 5), TokenTag::new("B-PER", 6, 9)];
        let spans = aggregate_simple(text, &tokens);
        assert_eq!(spans, [Span::new("PER", "Alice"), Span::new("PER", "Bob")]);
    }

    #[test]
    fn test_aggregate_class_change_splits() {
        let text = "Paris Hilton";
        let tokens = [TokenTag::new("I-LOC", 0, 5), TokenTag::new("I-PER", 6, 12)];
        let spans = aggregate_simple(text, &tokens);
        assert_eq!(spans, [Span::new("LOC", "Paris"), Span::new("PER", "Hilton")]);
    }

    #[test]
    fn test_aggregate_nothing() {
        assert!(aggregate_simple("", &[]).is_empty());
        assert!(aggregate_simple("plain", &[TokenTag::new("O", 0, 5)]).is_empty());
    }

    #[test]
    fn test_disabled_recognizer() {
        assert!(DisabledRecognizer.recognize("Angela Merkel").unwrap().is_empty());
    }

    #[cfg(not(feature = "onnx-ner"))]
    #[test]
    fn test_load_without_feature_fails() {
        let config = RecognizerConfig::default();
        let err = load_recognizer(&config).err().unwrap();
        assert!(matches!(err, Error::ModelLoad(_)));
    }
}
