//! Fixed algorithm identifiers.
//!
//! Both ends agree on parameters (hash choice, tag length, curve and
//! modulus size) through these strings; there is no negotiation.

/// Session-key wrapping: RSA-OAEP, 2048-bit modulus, SHA-256.
pub const KEY_WRAP: &str = "RSA-OAEP-2048-SHA-256";

/// Message cipher: AES-256-GCM, 96-bit nonce, 128-bit tag.
pub const MESSAGE_CIPHER: &str = "AES-256-GCM";

/// Scheme A signatures: RSA-PSS, 2048-bit modulus, SHA-256,
/// digest-length salt.
pub const SIGNATURE_SCHEME_A: &str = "RSA-PSS-2048-SHA-256";

/// Scheme B signatures: ECDSA over P-384 with SHA-384.
pub const SIGNATURE_SCHEME_B: &str = "ECDSA-P384-SHA-384";

/// Key interchange: SPKI DER (public) and PKCS#8 DER (private),
/// base-64 text on the wire.
pub const KEY_INTERCHANGE: &str = "SPKI/PKCS8-DER";
