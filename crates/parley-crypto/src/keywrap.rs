//! Session-key wrapping under RSA-OAEP.
//!
//! The room's symmetric session key is distributed as one wrapped copy
//! per participant, each encrypted under that participant's public
//! encryption key. OAEP padding is randomized, so wrapping the same key
//! twice yields different ciphertexts.
//!
//! The unwrapped bytes are exactly the secret [`crate::cipher`]
//! consumes; a wrong-length result is rejected here (fail closed)
//! rather than surfacing later as garbage key material.

use rand::{CryptoRng, RngCore};
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::{
    cipher::{SESSION_KEY_SIZE, SessionKey},
    error::CryptoError,
};

/// Wrap a session key under a recipient's public encryption key.
pub fn wrap_session_key<R: RngCore + CryptoRng>(
    key: &SessionKey,
    recipient: &RsaPublicKey,
    rng: &mut R,
) -> Result<Vec<u8>, CryptoError> {
    recipient
        .encrypt(rng, Oaep::new::<Sha256>(), key.as_bytes())
        .map_err(|e| CryptoError::KeyEncoding { reason: e.to_string() })
}

/// Unwrap a session key under our own private encryption key.
///
/// # Errors
///
/// [`CryptoError::Unwrap`] if the ciphertext was not produced for this
/// key pair. Padding failures and every other decryption failure map to
/// the same opaque error so the caller cannot be used as an oracle.
pub fn unwrap_session_key(
    wrapped: &[u8],
    own_private: &RsaPrivateKey,
) -> Result<SessionKey, CryptoError> {
    let bytes = own_private
        .decrypt(Oaep::new::<Sha256>(), wrapped)
        .map_err(|_| CryptoError::Unwrap)?;

    if bytes.len() != SESSION_KEY_SIZE {
        return Err(CryptoError::Unwrap);
    }

    SessionKey::from_slice(&bytes).map_err(|_| CryptoError::Unwrap)
}
