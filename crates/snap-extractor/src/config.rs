//! Configuration for the Extractor

use crate::image::MAX_IMAGE_BYTES;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Largest accepted image payload (bytes)
    pub max_image_bytes: usize,

    /// Maximum time for a single model call (seconds)
    pub model_timeout_secs: u64,
}

impl ExtractorConfig {
    /// Get the model timeout as a Duration
    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_image_bytes == 0 {
            return Err("max_image_bytes must be greater than 0".to_string());
        }
        if self.model_timeout_secs == 0 {
            return Err("model_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string(self).map_err(|e| format!("Failed to serialize TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: MAX_IMAGE_BYTES,
            model_timeout_secs: 60,
        }
    }
}
