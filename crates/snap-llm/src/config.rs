//! Model provider configuration

use crate::gemini::{self, GeminiProvider};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the hosted model, usually the `[model]` table of a TOML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API key; takes precedence over `api_key_env`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable read when `api_key` is not set
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// HTTP timeout for a single call (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    gemini::DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    gemini::DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    gemini::API_KEY_ENV.to_string()
}

fn default_timeout_secs() -> u64 {
    gemini::DEFAULT_TIMEOUT_SECS
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ModelConfig {
    /// Key from the config, else from the environment. Blank values count as unset.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }

    /// Build a provider. A missing key is not an error here; calls report it.
    pub fn build(&self) -> GeminiProvider {
        GeminiProvider::new(&self.endpoint, &self.model)
            .with_api_key(self.resolve_api_key())
            .with_api_key_env(&self.api_key_env)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}
