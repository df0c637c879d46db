//! Configuration file parsing for the server.
//!
//! Loads the bind address plus the `[model]`, `[store]` and `[extractor]`
//! tables from TOML.

use serde::Deserialize;
use snap_extractor::ExtractorConfig;
use snap_llm::ModelConfig;
use snap_store::StoreConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
///
/// ```toml
/// bind_address = "0.0.0.0"
/// bind_port = 3000
///
/// [model]
/// model = "gemini-2.5-flash"
///
/// [store]
/// backend = "sqlite"
/// path = "expenses.db"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 3000)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Hosted model settings
    #[serde(default)]
    pub model: ModelConfig,

    /// Store backend
    #[serde(default)]
    pub store: StoreConfig,

    /// Image limits and model timeout
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            model: ModelConfig::default(),
            store: StoreConfig::default(),
            extractor: ExtractorConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.extractor.validate().map_err(ConfigError::Invalid)?;
        if config.model.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "model.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(config)
    }

    /// Create a default configuration for testing (in-memory store)
    pub fn default_test_config() -> Self {
        ServerConfig {
            store: StoreConfig::Sqlite {
                path: PathBuf::from(":memory:"),
            },
            ..Self::default()
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
