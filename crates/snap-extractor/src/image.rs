//! Receipt image encoding
//!
//! Checks the payload before any model call and wraps it as an
//! [`InlineImage`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use snap_domain::{InlineImage, ValidationError};

/// Default upper bound on image payloads (5 MiB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted for receipts
pub const SUPPORTED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/jpg"];

/// Lowercase and drop parameters (`image/PNG; q=1` becomes `image/png`)
fn canonical_mime(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Validate and base64-encode an image.
///
/// The type is checked first, then emptiness, then size.
///
/// # Examples
///
/// ```
/// use snap_extractor::image::{encode_image, MAX_IMAGE_BYTES};
///
/// let image = encode_image(b"hello", "image/png", MAX_IMAGE_BYTES).unwrap();
/// assert_eq!(image.data, "aGVsbG8=");
/// assert_eq!(image.mime_type, "image/png");
/// ```
pub fn encode_image(
    bytes: &[u8],
    mime_type: &str,
    max_bytes: usize,
) -> Result<InlineImage, ValidationError> {
    let mime_type = canonical_mime(mime_type);
    if !SUPPORTED_MIME_TYPES.contains(&mime_type.as_str()) {
        return Err(ValidationError::UnsupportedImageType(mime_type));
    }
    if bytes.is_empty() {
        return Err(ValidationError::EmptyImage);
    }
    if bytes.len() > max_bytes {
        return Err(ValidationError::ImageTooLarge {
            size: bytes.len(),
            max: max_bytes,
        });
    }

    Ok(InlineImage {
        mime_type,
        data: STANDARD.encode(bytes),
    })
}

/// Guess a receipt MIME type from a file extension
pub fn mime_from_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}
