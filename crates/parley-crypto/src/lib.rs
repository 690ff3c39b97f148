//! Parley Cryptographic Primitives
//!
//! Cryptographic building blocks for Parley's confidential group
//! messaging. All operations take explicit key material and, where the
//! algorithm is randomized, an explicit RNG. No function reads ambient
//! state.
//!
//! # Key Lifecycle
//!
//! Each participant owns three long-lived key pairs: an RSA-2048
//! encryption pair (key wrapping) and a signing identity made of an
//! RSA-PSS pair and an ECDSA P-384 pair (dual-scheme message
//! signatures). Each room has one 32-byte session key, distributed as
//! one RSA-OAEP-wrapped copy per participant.
//!
//! ```text
//! Room Session Key (32 bytes)
//!        │
//!        ▼
//! RSA-OAEP Wrap → one wrapped copy per participant
//!        │
//!        ▼
//! RSA-OAEP Unwrap (recipient's private key)
//!        │
//!        ▼
//! AES-256-GCM → per-message ciphertext blobs
//! ```
//!
//! Message authenticity is independent of confidentiality: every
//! outgoing message carries one signature per scheme, computed over the
//! plaintext before encryption. The verifier picks whichever scheme it
//! currently trusts.
//!
//! # Security
//!
//! Confidentiality and integrity:
//! - AES-256-GCM binds ciphertext and tag; any flipped byte rejects the
//!   whole message
//! - OAEP padding failures surface as a single opaque unwrap error (no
//!   padding oracle)
//!
//! Key hygiene:
//! - Session keys are zeroized on drop
//! - Private keys never appear in exported form except through the
//!   explicit PKCS#8 export functions
//!
//! Algorithm agility:
//! - Both signature schemes are attached to every message, so a
//!   verifier can switch trusted scheme without the sender resending

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cipher;
pub mod error;
pub mod identity;
pub mod keywrap;
pub mod signature;

pub use cipher::{NONCE_SIZE, SESSION_KEY_SIZE, SessionKey, TAG_SIZE, decrypt_message, encrypt_message};
pub use error::CryptoError;
pub use identity::{
    Identity, PublicKeySet, RSA_MODULUS_BITS, SigningKeys, export_ecdsa_private,
    export_ecdsa_public, export_rsa_private, export_rsa_public, generate_encryption_keys,
    generate_signing_keys, import_ecdsa_private, import_ecdsa_public, import_rsa_private,
    import_rsa_public,
};
pub use keywrap::{unwrap_session_key, wrap_session_key};
pub use signature::{
    MessageSignatures, SignatureScheme, VerifierKeys, sign_both, sign_ecdsa_p384, sign_rsa_pss,
    verify_ecdsa_p384, verify_rsa_pss, verify_selected,
};
