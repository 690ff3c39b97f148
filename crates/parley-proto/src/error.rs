//! Protocol payload errors.

use thiserror::Error;

/// Errors from encoding or decoding wire payloads.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// JSON payload could not be encoded or decoded
    #[error("json payload error: {0}")]
    Json(#[from] serde_json::Error),

    /// A base-64 field held invalid text
    #[error("invalid base-64 in field {field}: {source}")]
    Base64 {
        /// Which field was malformed
        field: &'static str,
        /// Underlying decode error
        source: base64::DecodeError,
    },
}
