//! Expense Snap Model Provider Layer
//!
//! Implementations of the `ModelProvider` trait from `snap-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google Gemini `generateContent` API
//!
//! # Examples
//!
//! ```
//! use snap_llm::MockProvider;
//! use snap_domain::traits::ModelProvider;
//! use snap_domain::InlineImage;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new(r#"{"total": 1.0}"#);
//! let image = InlineImage { mime_type: "image/png".into(), data: "AA==".into() };
//! let reply = provider.generate("prompt", &image).await.unwrap();
//! assert_eq!(reply, r#"{"total": 1.0}"#);
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod gemini;

use async_trait::async_trait;
use snap_domain::traits::ModelProvider;
use snap_domain::InlineImage;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;

pub use config::ModelConfig;
pub use gemini::GeminiProvider;

/// Provider handle shared across request handlers
pub type SharedProvider = Arc<dyn ModelProvider<Error = LlmError>>;

/// Errors that can occur during model calls
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// No API credential configured; names the environment variable to set
    #[error("{0} environment variable is required")]
    MissingCredential(String),

    /// Network or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// Call did not complete in time
    #[error("Model call timed out after {0} seconds")]
    Timeout(u64),

    /// Non-2xx answer from the API
    #[error("HTTP {status}: {message}")]
    Http {
        /// Status code
        status: u16,
        /// Message extracted from the error body
        message: String,
    },

    /// 2xx answer that carried no usable text
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock model provider for deterministic testing
///
/// Returns queued replies first, then the default reply, without any network
/// calls. Records every image it was given.
///
/// # Examples
///
/// ```
/// use snap_llm::{LlmError, MockProvider};
///
/// let provider = MockProvider::new("fallback");
/// provider.push_reply("first");
/// provider.push_error(LlmError::Other("boom".into()));
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_reply: String,
    queued: Arc<Mutex<VecDeque<Result<String, LlmError>>>>,
    images: Arc<Mutex<Vec<InlineImage>>>,
    call_count: Arc<Mutex<usize>>,
    delay: Option<Duration>,
    ready: Option<LlmError>,
}

impl MockProvider {
    /// Create a MockProvider with a fixed reply for every call
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            default_reply: reply.into(),
            queued: Arc::new(Mutex::new(VecDeque::new())),
            images: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            delay: None,
            ready: None,
        }
    }

    /// Queue a reply for the next call
    pub fn push_reply(&self, reply: impl Into<String>) {
        lock(&self.queued).push_back(Ok(reply.into()));
    }

    /// Queue a failure for the next call
    pub fn push_error(&self, error: LlmError) {
        lock(&self.queued).push_back(Err(error));
    }

    /// Sleep this long before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make `ensure_ready` fail with this error
    pub fn not_ready(mut self, error: LlmError) -> Self {
        self.ready = Some(error);
        self
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Images received so far, oldest first
    pub fn images(&self) -> Vec<InlineImage> {
        lock(&self.images).clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    type Error = LlmError;

    async fn generate(&self, _prompt: &str, image: &InlineImage) -> Result<String, Self::Error> {
        *lock(&self.call_count) += 1;
        lock(&self.images).push(image.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let queued = lock(&self.queued).pop_front();
        match queued {
            Some(result) => result,
            None => Ok(self.default_reply.clone()),
        }
    }

    fn ensure_ready(&self) -> Result<(), Self::Error> {
        match &self.ready {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
