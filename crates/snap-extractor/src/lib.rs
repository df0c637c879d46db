//! Expense Snap Extractor
//!
//! Turns a receipt photo into a validated [`ExpenseDraft`](snap_domain::ExpenseDraft)
//! using a multimodal model.
//!
//! # Architecture
//!
//! ```text
//! image bytes → encode_image → model call → raw text → normalize_response → ExpenseDraft
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use snap_extractor::{ExtractorConfig, ReceiptExtractor};
//! use snap_llm::GeminiProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = GeminiProvider::from_env("gemini-2.5-flash");
//! let extractor = ReceiptExtractor::new(provider, ExtractorConfig::default());
//!
//! let bytes = std::fs::read("receipt.jpg")?;
//! let draft = extractor.extract(&bytes, "image/jpeg").await?;
//! println!("{} {} at {}", draft.total, draft.currency, draft.vendor);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
pub mod image;
mod parser;
mod prompt;


pub use config::ExtractorConfig;
pub use error::{ExtractorError, ParseFailure};
pub use extractor::ReceiptExtractor;
pub use image::{encode_image, MAX_IMAGE_BYTES};
pub use parser::normalize_response;
pub use prompt::PromptBuilder;
