//! Base-64 text encoding for binary wire fields.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::error::ProtocolError;

/// Encode binary bytes for a text payload field.
pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a base-64 text field back to bytes.
///
/// `field` names the payload field for the error message.
pub fn decode_field(field: &'static str, text: &str) -> Result<Vec<u8>, ProtocolError> {
    STANDARD.decode(text).map_err(|source| ProtocolError::Base64 { field, source })
}
