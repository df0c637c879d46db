//! Gemini Provider Implementation
//!
//! Calls Google's `generateContent` endpoint with one text part (the prompt)
//! and one inline image part, and returns the concatenated text of the first
//! candidate.
//!
//! Calls are not retried: a failed or timed-out call is reported to the
//! caller as is.
//!
//! # Examples
//!
//! ```no_run
//! use snap_llm::GeminiProvider;
//!
//! let provider = GeminiProvider::new(snap_llm::gemini::DEFAULT_ENDPOINT, "gemini-2.5-flash")
//!     .with_api_key(std::env::var("GOOGLE_API_KEY").ok());
//! ```

use crate::LlmError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use snap_domain::traits::ModelProvider;
use snap_domain::{InlineImage, InlinePart};
use std::time::Duration;
use tracing::debug;

/// Default Gemini API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Default timeout for a single call (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Gemini API provider
pub struct GeminiProvider {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
    client: reqwest::Client,
    timeout: Duration,
}

/// Request body for `generateContent`
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Text { text: &'a str },
    Inline(InlinePart<'a>),
}

/// Response from `generateContent`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Error envelope returned with non-2xx statuses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn into_text(self) -> Result<String, LlmError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(LlmError::InvalidResponse(format!("Prompt blocked: {}", reason)));
        }

        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::InvalidResponse(
                "Response contained no text candidates".to_string(),
            ));
        }
        Ok(text)
    }
}

/// Pull `error.message` out of an API error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                body.trim().to_string()
            }
        })
}

impl GeminiProvider {
    /// Create a new Gemini provider without a credential
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL (e.g., "https://generativelanguage.googleapis.com")
    /// - `model`: Model to use (e.g., "gemini-2.5-flash")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: None,
            api_key_env: API_KEY_ENV.to_string(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create a provider for the default endpoint, reading the key from `GOOGLE_API_KEY`
    pub fn from_env(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model).with_api_key(std::env::var(API_KEY_ENV).ok())
    }

    /// Set the API key. Empty keys count as missing.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Name of the environment variable reported when the key is missing
    pub fn with_api_key_env(mut self, name: impl Into<String>) -> Self {
        self.api_key_env = name.into();
        self
    }

    /// Set the per-call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> Result<&str, LlmError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| LlmError::MissingCredential(self.api_key_env.clone()))
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl ModelProvider for GeminiProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str, image: &InlineImage) -> Result<String, LlmError> {
        let api_key = self.api_key()?;

        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::Text { text: prompt },
                    RequestPart::Inline(image.as_part()),
                ],
            }],
        };

        debug!("Calling {} with {} image", self.model, image.mime_type);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .timeout(self.timeout)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.timeout.as_secs())
                } else {
                    LlmError::Communication(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Http {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        parsed.into_text()
    }

    fn ensure_ready(&self) -> Result<(), LlmError> {
        self.api_key().map(|_| ())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
