use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the directory holding the NER model files.
pub const MODEL_DIR_ENV: &str = "DOCINTEL_MODEL_DIR";

/// Where and how the entity recognizer is loaded.
///
/// The model directory is expected to contain `model.onnx`, `tokenizer.json`
/// and the `config.json` carrying the model's `id2label` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizerConfig {
    pub model_dir: PathBuf,
    /// Characters of document text passed to the model.
    pub max_chars: usize,
    /// Tokenizer truncation length.
    pub max_tokens: usize,
}

impl RecognizerConfig {
    pub const DEFAULT_MAX_CHARS: usize = 1000;
    pub const DEFAULT_MAX_TOKENS: usize = 512;

    /// Defaults, with the model directory taken from `DOCINTEL_MODEL_DIR` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = lookup(MODEL_DIR_ENV).filter(|dir| !dir.trim().is_empty()) {
            config.model_dir = PathBuf::from(dir);
        }
        config
    }

    #[must_use]
    pub fn with_model_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.model_dir = dir.as_ref().to_path_buf();
        self
    }
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            model_dir: default_model_dir(),
            max_chars: Self::DEFAULT_MAX_CHARS,
            max_tokens: Self::DEFAULT_MAX_TOKENS,
        }
    }
}

fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docintel")
        .join("models")
        .join("bert-base-ner")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RecognizerConfig::default();
        assert_eq!(config.max_chars, 1000);
        assert_eq!(config.max_tokens, 512);
        assert!(config.model_dir.ends_with("docintel/models/bert-base-ner"));
    }

    #[test]
    fn test_model_dir_from_env() {
        let config = RecognizerConfig::from_lookup(|key| {
            (key == MODEL_DIR_ENV).then(|| "/opt/models/ner".to_string())
        });
        assert_eq!(config.model_dir, PathBuf::from("/opt/models/ner"));
        assert_eq!(config.max_chars, 1000);
    }

    #[test]
    fn test_blank_env_keeps_default() {
        let config = RecognizerConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config, RecognizerConfig::default());
    }

    #[test]
    fn test_with_model_dir() {
        let config = RecognizerConfig::default().with_model_dir("/tmp/ner");
        assert_eq!(config.model_dir, PathBuf::from("/tmp/ner"));
    }
}
