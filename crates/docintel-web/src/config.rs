use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use docintel_core::config::MODEL_DIR_ENV;
use docintel_core::RecognizerConfig;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Largest request body accepted by `/extract`
    pub max_upload_bytes: usize,
    pub recognizer: RecognizerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            max_upload_bytes: 10 * 1024 * 1024,
            recognizer: RecognizerConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let mut recognizer = defaults.recognizer;
        if let Some(dir) = lookup(MODEL_DIR_ENV).filter(|dir| !dir.trim().is_empty()) {
            recognizer = recognizer.with_model_dir(dir);
        }

        Self {
            host: setting(&lookup, "DOCINTEL_HOST").unwrap_or(defaults.host),
            port: setting(&lookup, "DOCINTEL_PORT").unwrap_or(defaults.port),
            max_upload_bytes: setting(&lookup, "DOCINTEL_MAX_UPLOAD_BYTES").unwrap_or(defaults.max_upload_bytes),
            recognizer,
        }
    }

    pub const fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn setting<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable setting");
            None
        }
    }
}
