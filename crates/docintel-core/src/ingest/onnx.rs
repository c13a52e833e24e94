use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::TensorRef;
use serde::Deserialize;
use tokenizers::{Tokenizer, TruncationParams};

use super::recognizer::{aggregate_simple, Recognizer, Span, TokenTag};
use crate::config::RecognizerConfig;
use crate::error::{Error, Result};

#[derive(Deserialize)]
struct ModelConfig {
    id2label: HashMap<String, String>,
}

/// Token-classification model run through ONNX Runtime.
///
/// `Session::run` takes `&mut self`, hence the mutex; concurrent requests
/// queue on it.
pub struct OnnxRecognizer {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    labels: Vec<String>,
    max_chars: usize,
}

impl OnnxRecognizer {
    pub fn load(config: &RecognizerConfig) -> Result<Self> {
        let dir = &config.model_dir;
        let model_path = dir.join("model.onnx");
        let tokenizer_path = dir.join("tokenizer.json");
        let config_path = dir.join("config.json");

        for path in [&model_path, &tokenizer_path, &config_path] {
            if !path.exists() {
                return Err(Error::ModelLoad(format!("{} not found", path.display())));
            }
        }

        let session = Session::builder()
            .map_err(|e: ort::Error| Error::ModelLoad(e.to_string()))?
            .with_intra_threads(2)
            .map_err(|e: ort::Error| Error::ModelLoad(e.to_string()))?
            .commit_from_file(&model_path)
            .map_err(|e: ort::Error| Error::ModelLoad(format!("ONNX load failed: {e}")))?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| Error::ModelLoad(format!("tokenizer load failed: {e}")))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_tokens,
                ..TruncationParams::default()
            }))
            .map_err(|e| Error::ModelLoad(format!("tokenizer truncation: {e}")))?;
        tokenizer.with_padding(None);

        let labels = read_labels(&config_path)?;

        tracing::info!(
            model_dir = %dir.display(),
            labels = labels.len(),
            "NER model loaded"
        );

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            labels,
            max_chars: config.max_chars,
        })
    }

    fn tag_tokens(&self, text: &str) -> Result<Vec<TokenTag>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| Error::RecognitionFailure(format!("tokenization: {e}")))?;

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| i64::from(id)).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| i64::from(m))
            .collect();
        let token_type_ids: Vec<i64> = encoding.get_type_ids().iter().map(|&t| i64::from(t)).collect();
        let seq_len = input_ids.len();

        let ids_array = ndarray::Array2::from_shape_vec((1, seq_len), input_ids).map_err(inference)?;
        let mask_array =
            ndarray::Array2::from_shape_vec((1, seq_len), attention_mask).map_err(inference)?;
        let type_array =
            ndarray::Array2::from_shape_vec((1, seq_len), token_type_ids).map_err(inference)?;

        let ids_tensor = TensorRef::from_array_view(&ids_array).map_err(inference)?;
        let mask_tensor = TensorRef::from_array_view(&mask_array).map_err(inference)?;
        let type_tensor = TensorRef::from_array_view(&type_array).map_err(inference)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| Error::RecognitionFailure("session lock poisoned".to_string()))?;
        let outputs = session
            .run(ort::inputs![ids_tensor, mask_tensor, type_tensor])
            .map_err(|e| Error::RecognitionFailure(format!("ONNX inference failed: {e}")))?;

        // [1, seq_len, num_labels]
        let (shape, logits) = outputs[0].try_extract_tensor::<f32>().map_err(inference)?;
        let num_labels = self.labels.len();
        check_logits_shape(&shape[..], seq_len, num_labels)?;

        let special = encoding.get_special_tokens_mask();
        let offsets = encoding.get_offsets();
        let tags = (0..seq_len)
            .filter(|&i| special[i] == 0)
            .map(|i| {
                let row = &logits[i * num_labels..(i + 1) * num_labels];
                let (start, end) = offsets[i];
                TokenTag::new(self.labels[argmax(row)].clone(), start, end)
            })
            .collect();

        Ok(tags)
    }
}

impl Recognizer for OnnxRecognizer {
    fn name(&self) -> &'static str {
        "onnx"
    }

    fn max_chars(&self) -> usize {
        self.max_chars
    }

    fn infer(&self, text: &str) -> Result<Vec<Span>> {
        let tags = self.tag_tokens(text)?;
        let spans = aggregate_simple(text, &tags);
        tracing::debug!(tokens = tags.len(), spans = spans.len(), "NER inference complete");
        Ok(spans)
    }
}

/// Logits must be `[1, seq_len, num_labels]`.
fn check_logits_shape(shape: &[i64], seq_len: usize, num_labels: usize) -> Result<()> {
    let dim = |d: i64| usize::try_from(d).ok();
    match shape {
        [1, seq, labels] if dim(*seq) == Some(seq_len) && dim(*labels) == Some(num_labels) => Ok(()),
        _ => Err(Error::RecognitionFailure(format!(
            "unexpected output shape {shape:?}, expected [1, {seq_len}, {num_labels}]"
        ))),
    }
}

fn inference(err: impl std::fmt::Display) -> Error {
    Error::RecognitionFailure(err.to_string())
}

fn argmax(row: &[f32]) -> usize {
    row.iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |best, (idx, &score)| {
            if score > best.1 {
                (idx, score)
            } else {
                best
            }
        })
        .0
}

fn read_labels(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| Error::ModelLoad(format!("{}: {e}", path.display())))?;
    parse_labels(&raw)
}

/// Turns the `id2label` map of a model config into an index-ordered table.
fn parse_labels(raw: &str) -> Result<Vec<String>> {
    let config: ModelConfig =
        serde_json::from_str(raw).map_err(|e| Error::ModelLoad(format!("model config: {e}")))?;

    let mut labels = vec![String::new(); config.id2label.len()];
    for (id, label) in config.id2label {
        let idx: usize = id
            .parse()
            .map_err(|_| Error::ModelLoad(format!("non-numeric label id {id:?}")))?;
        let slot = labels
            .get_mut(idx)
            .ok_or_else(|| Error::ModelLoad(format!("label id {idx} out of range")))?;
        *slot = label;
    }

    if labels.is_empty() {
        return Err(Error::ModelLoad("model config has no labels".to_string()));
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels_orders_by_id() {
        let raw = r#"{"id2label": {"2": "I-PER", "0": "O", "1": "B-PER"}, "model_type": "bert"}"#;
        assert_eq!(parse_labels(raw).unwrap(), ["O", "B-PER", "I-PER"]);
    }

    #[test]
    fn test_parse_labels_rejects_gaps() {
        let raw = r#"{"id2label": {"0": "O", "5": "B-PER"}}"#;
        assert!(matches!(parse_labels(raw), Err(Error::ModelLoad(_))));
    }

    #[test]
    fn test_parse_labels_rejects_missing_table() {
        assert!(matches!(parse_labels("{}"), Err(Error::ModelLoad(_))));
    }

    #[test]
    fn test_argmax() {
        assert_eq!(argmax(&[0.1, 2.5, -1.0, 2.4]), 1);
        assert_eq!(argmax(&[3.0]), 0);
    }

    #[test]
    fn test_logits_shape() {
        assert!(check_logits_shape(&[1, 7, 9], 7, 9).is_ok());
        assert!(matches!(
            check_logits_shape(&[1, 6, 9], 7, 9),
            Err(Error::RecognitionFailure(_))
        ));
        assert!(check_logits_shape(&[1, -1, 9], 7, 9).is_err());
        assert!(check_logits_shape(&[7, 9], 7, 9).is_err());
    }

    #[test]
    fn test_load_missing_dir() {
        let config = RecognizerConfig::default().with_model_dir("/nonexistent/docintel-model");
        let err = OnnxRecognizer::load(&config).err().unwrap();
        assert!(err.to_string().contains("model.onnx"), "{err}");
    }
}
