//! Error types for Parley cryptographic operations.

use thiserror::Error;

use crate::signature::SignatureScheme;

/// Errors from cryptographic operations.
///
/// Every failure is terminal for the single operation that raised it.
/// Retrying cannot change a cryptographic outcome, so callers surface
/// these to the session controller which decides user-visible behavior.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key pair generation failed (entropy or parameter failure)
    #[error("key generation failed: {reason}")]
    KeyGeneration {
        /// What the underlying generator reported
        reason: String,
    },

    /// Malformed or unsupported key interchange bytes
    #[error("key encoding rejected: {reason}")]
    KeyEncoding {
        /// What the decoder reported
        reason: String,
    },

    /// Session key could not be recovered under the local private key.
    ///
    /// Deliberately carries no detail: OAEP padding failures and other
    /// decryption failures must be indistinguishable to the caller to
    /// avoid oracle leakage.
    #[error("session key unwrap failed")]
    Unwrap,

    /// Authentication tag mismatch during message decryption.
    ///
    /// Treated as tampering, not a transient fault. No plaintext is
    /// ever returned alongside this error.
    #[error("message authentication failed")]
    AuthenticationFailure,

    /// Message decryption failed before the tag was even checked
    /// (malformed blob, missing key at the call site)
    #[error("decryption failed: {reason}")]
    Decryption {
        /// Reason for decryption failure
        reason: String,
    },

    /// Signature verification returned false
    #[error("signature verification failed under {scheme}")]
    SignatureMismatch {
        /// Scheme the verification ran under
        scheme: SignatureScheme,
    },

    /// Signature scheme tag names neither supported scheme.
    ///
    /// Only raised at the deserialization boundary; internal dispatch
    /// is an exhaustive enum match.
    #[error("unknown signature scheme tag: {tag}")]
    UnknownScheme {
        /// The unrecognized tag
        tag: String,
    },
}

impl CryptoError {
    /// Returns true if this error indicates tampering or a key that was
    /// never valid for the data, as opposed to a local usage error.
    ///
    /// Tampering errors must never lead to partial plaintext reaching
    /// the display layer.
    pub fn is_tampering(&self) -> bool {
        match self {
            Self::Unwrap | Self::AuthenticationFailure | Self::SignatureMismatch { .. } => true,

            Self::KeyGeneration { .. }
            | Self::KeyEncoding { .. }
            | Self::Decryption { .. }
            | Self::UnknownScheme { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CryptoError;

    #[test]
    fn tampering_classification() {
        assert!(CryptoError::Unwrap.is_tampering());
        assert!(CryptoError::AuthenticationFailure.is_tampering());
        assert!(
            !CryptoError::Decryption { reason: "blob too short".to_string() }.is_tampering()
        );
        assert!(!CryptoError::UnknownScheme { tag: "DSA-3072".to_string() }.is_tampering());
    }

    #[test]
    fn display_carries_no_unwrap_detail() {
        // The unwrap error must not leak why decryption failed.
        assert_eq!(CryptoError::Unwrap.to_string(), "session key unwrap failed");
    }
}
