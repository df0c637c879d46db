//! Inline image payload for multimodal model calls

use serde::{Deserialize, Serialize};

/// Base64-encoded image with its MIME type.
///
/// Serializes as `{"mimeType": ..., "data": ...}`. Wrap it with
/// [`InlineImage::as_part`] to get the `{"inlineData": {...}}` part the
/// model API expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    /// MIME type, e.g. `image/jpeg`
    pub mime_type: String,

    /// Standard base64 of the raw image bytes
    pub data: String,
}

impl InlineImage {
    /// Borrow as an inline content part
    pub fn as_part(&self) -> InlinePart<'_> {
        InlinePart { inline_data: self }
    }
}

/// `{"inlineData": {"mimeType": ..., "data": ...}}`
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlinePart<'a> {
    /// The wrapped image
    pub inline_data: &'a InlineImage,
}
