use std::sync::Arc;

use docintel_core::{load_recognizer, ExtractionPipeline, Recognizer};

use crate::config::ServerConfig;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// `None` when the model failed to load; extraction then answers 503.
    pub pipeline: Option<Arc<ExtractionPipeline>>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Loads the recognizer once for the life of the process.
    pub fn load(config: ServerConfig) -> Self {
        let pipeline = match load_recognizer(&config.recognizer) {
            Ok(recognizer) => {
                tracing::info!(recognizer = recognizer.name(), "document extractor ready");
                Some(Arc::new(ExtractionPipeline::new(recognizer)))
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    model_dir = %config.recognizer.model_dir.display(),
                    "document extractor unavailable"
                );
                None
            }
        };

        Self {
            pipeline,
            config: Arc::new(config),
        }
    }

    #[cfg(test)]
    pub fn with_recognizer(config: ServerConfig, recognizer: Arc<dyn Recognizer>) -> Self {
        Self {
            pipeline: Some(Arc::new(ExtractionPipeline::new(recognizer))),
            config: Arc::new(config),
        }
    }

    pub const fn is_ready(&self) -> bool {
        self.pipeline.is_some()
    }
}
