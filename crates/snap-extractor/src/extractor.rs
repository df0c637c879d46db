//! Core receipt extraction pipeline

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::image::encode_image;
use crate::parser::normalize_response;
use crate::prompt::PromptBuilder;
use snap_domain::traits::ModelProvider;
use snap_domain::ExpenseDraft;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Converts receipt images into validated expense drafts
///
/// Each call is independent: encode the image, send it with the prompt,
/// normalize the reply. Failed calls are not retried.
pub struct ReceiptExtractor<P> {
    provider: P,
    config: ExtractorConfig,
    prompt: String,
}

impl<P> ReceiptExtractor<P>
where
    P: ModelProvider,
    ExtractorError: From<P::Error>,
{
    /// Create a new extractor with the default prompt
    pub fn new(provider: P, config: ExtractorConfig) -> Self {
        Self {
            provider,
            config,
            prompt: PromptBuilder::new().build(),
        }
    }

    /// Use a custom prompt
    pub fn with_prompt(mut self, prompt: &PromptBuilder) -> Self {
        self.prompt = prompt.build();
        self
    }

    /// Fail with `Configuration` if the provider cannot make calls
    pub fn ensure_ready(&self) -> Result<(), ExtractorError> {
        self.provider.ensure_ready().map_err(ExtractorError::from)
    }

    /// Model identifier of the underlying provider
    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract an expense draft from raw image bytes
    pub async fn extract(
        &self,
        bytes: &[u8],
        mime_type: &str,
    ) -> Result<ExpenseDraft, ExtractorError> {
        let image = encode_image(bytes, mime_type, self.config.max_image_bytes)?;
        self.ensure_ready()?;

        info!(
            "Extracting receipt ({} bytes, {}) with {}",
            bytes.len(),
            image.mime_type,
            self.model_name()
        );
        let start_time = Instant::now();

        let reply = timeout(
            self.config.model_timeout(),
            self.provider.generate(&self.prompt, &image),
        )
        .await
        .map_err(|_| {
            ExtractorError::ExternalCall(format!(
                "Model call timed out after {} seconds",
                self.config.model_timeout_secs
            ))
        })??;

        debug!(
            "Model replied with {} chars in {} ms",
            reply.len(),
            start_time.elapsed().as_millis()
        );

        match normalize_response(&reply) {
            Ok(draft) => {
                info!(
                    "Extracted {} {:.2} {} from '{}'",
                    draft.category, draft.total, draft.currency, draft.vendor
                );
                Ok(draft)
            }
            Err(failure) => {
                warn!(
                    "Failed to parse model response ({}). Raw response: {}",
                    failure.reason, failure.raw_text
                );
                Err(failure.into())
            }
        }
    }
}
