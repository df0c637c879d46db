//! Validation errors raised before any external call is made

use thiserror::Error;

/// A value failed one of the domain constraints.
///
/// Each variant names the constraint that was violated so callers can tell
/// an oversized image from one with the wrong type, or a bad total from a
/// bad date.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Image MIME type is not one of the accepted receipt formats
    #[error("Unsupported image type '{0}' (expected image/jpeg, image/png or image/jpg)")]
    UnsupportedImageType(String),

    /// Image payload exceeds the configured size limit
    #[error("Image is {size} bytes, exceeding the {max} byte limit")]
    ImageTooLarge {
        /// Size of the rejected payload
        size: usize,
        /// Configured maximum
        max: usize,
    },

    /// Image payload has no bytes
    #[error("Image payload is empty")]
    EmptyImage,

    /// Total could not be read as a finite number
    #[error("Invalid total: '{0}'")]
    InvalidTotal(String),

    /// Total is below zero
    #[error("Total must be non-negative, got {0}")]
    NegativeTotal(f64),

    /// Currency is not a three-letter code
    #[error("Invalid currency code: '{0}'")]
    InvalidCurrency(String),

    /// Free-text category is blank
    #[error("Category must not be empty")]
    EmptyCategory,

    /// Vendor is blank
    #[error("Vendor must not be empty")]
    EmptyVendor,

    /// A date or timestamp field could not be parsed
    #[error("Invalid {field}: '{value}'")]
    InvalidDate {
        /// Name of the offending field
        field: &'static str,
        /// Raw value as received
        value: String,
    },

    /// A required field is absent
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
