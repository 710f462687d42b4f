//! Configuration for spam-rs

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{Result, SpamError};

/// Main service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Pretrained artifact locations
    pub model: ModelConfig,
    /// Text normalization settings
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address (e.g., "0.0.0.0:5000")
    pub listen_addr: String,
    /// Origins allowed by CORS; empty means any origin
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
    /// Maximum accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Paths of the pretrained artifacts
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// TF-IDF vectorizer export
    pub vectorizer_path: PathBuf,
    /// Numeric feature scaler export
    pub scaler_path: PathBuf,
    /// Classifier export
    pub classifier_path: PathBuf,
    /// Optional lemma list (one word per line) used by the lemmatizer
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,
}

/// Token length bounds applied during normalization
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct NormalizerConfig {
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
    #[serde(default = "default_max_token_len")]
    pub max_token_len: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

fn default_max_body_bytes() -> usize {
    1024 * 1024 // 1MB
}

fn default_min_token_len() -> usize {
    2
}

fn default_max_token_len() -> usize {
    13
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            min_token_len: default_min_token_len(),
            max_token_len: default_max_token_len(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SpamError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| SpamError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Create a default development configuration
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                listen_addr: "127.0.0.1:5000".to_string(),
                cors_allowed_origins: Vec::new(),
                max_body_bytes: default_max_body_bytes(),
            },
            model: ModelConfig {
                vectorizer_path: PathBuf::from("models/tfidf_vectorizer.json"),
                scaler_path: PathBuf::from("models/scaler.json"),
                classifier_path: PathBuf::from("models/naive_bayes_model.json"),
                lexicon_path: None,
            },
            normalizer: NormalizerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.server.listen_addr.parse::<SocketAddr>().map_err(|e| {
            SpamError::Config(format!(
                "Invalid listen address '{}': {}",
                self.server.listen_addr, e
            ))
        })?;

        if self.server.max_body_bytes == 0 {
            return Err(SpamError::Config("max_body_bytes must be positive".to_string()));
        }

        let NormalizerConfig {
            min_token_len,
            max_token_len,
        } = self.normalizer;
        if min_token_len == 0 || min_token_len > max_token_len {
            return Err(SpamError::Config(format!(
                "Invalid token length bounds [{}, {}]",
                min_token_len, max_token_len
            )));
        }

        for (name, path) in [
            ("vectorizer_path", &self.model.vectorizer_path),
            ("scaler_path", &self.model.scaler_path),
            ("classifier_path", &self.model.classifier_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(SpamError::Config(format!("model.{} is empty", name)));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::development()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.normalizer.min_token_len, 2);
        assert_eq!(config.normalizer.max_token_len, 13);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[server]
listen_addr = "0.0.0.0:8080"
cors_allowed_origins = ["https://mail.google.com"]

[model]
vectorizer_path = "/srv/models/tfidf.json"
scaler_path = "/srv/models/scaler.json"
classifier_path = "/srv/models/nb.json"

[logging]
level = "debug"
format = "json"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.server.cors_allowed_origins.len(), 1);
        assert_eq!(config.server.max_body_bytes, 1024 * 1024);
        assert_eq!(config.normalizer.max_token_len, 13);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.model.lexicon_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_bounds() {
        let mut config = Config::default();
        config.normalizer.min_token_len = 5;
        config.normalizer.max_token_len = 3;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.listen_addr = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_example_config_is_valid() {
        let config: Config = toml::from_str(include_str!("../config.example.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.server.cors_allowed_origins.is_empty());
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file(Path::new("/nonexistent/spam-rs.toml")).unwrap_err();
        assert!(matches!(err, SpamError::Config(_)));
    }
}
