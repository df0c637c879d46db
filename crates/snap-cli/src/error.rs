//! Error types for the CLI application.

use snap_domain::ValidationError;
use snap_extractor::ExtractorError;
use snap_store::StoreError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Receipt extraction failed
    #[error("{0}")]
    Extraction(#[from] ExtractorError),

    /// Store error
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Expense fields are invalid
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No expense with this ID
    #[error("Expense not found: {0}")]
    NotFound(String),
}
