//! Message encryption using AES-256-GCM.
//!
//! One session key per room; every message gets a fresh random 96-bit
//! nonce. The transportable blob layout is fixed so any implementation
//! can parse another's output:
//!
//! ```text
//! [nonce: 12 bytes][ciphertext][tag: 16 bytes]
//! ```
//!
//! (the tag is appended to the ciphertext per the AEAD convention).

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::CryptoError;

/// Raw session key size in bytes (AES-256).
pub const SESSION_KEY_SIZE: usize = 32;

/// GCM nonce size (96 bits), first `NONCE_SIZE` bytes of every blob.
pub const NONCE_SIZE: usize = 12;

/// GCM authentication tag size (128 bits).
pub const TAG_SIZE: usize = 16;

/// Symmetric secret shared by all participants of one room.
///
/// The raw bytes never cross a process boundary; only RSA-wrapped
/// copies do (see [`crate::keywrap`]). Zeroized on drop.
#[derive(Clone)]
pub struct SessionKey([u8; SESSION_KEY_SIZE]);

impl SessionKey {
    /// Generate a fresh random session key.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut key = [0u8; SESSION_KEY_SIZE];
        rng.fill_bytes(&mut key);
        Self(key)
    }

    /// Wrap existing raw key material.
    pub fn from_bytes(bytes: [u8; SESSION_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Build a session key from a slice, rejecting wrong lengths.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let key: [u8; SESSION_KEY_SIZE] =
            bytes.try_into().map_err(|_| CryptoError::Decryption {
                reason: format!(
                    "session key must be {SESSION_KEY_SIZE} bytes, got {}",
                    bytes.len()
                ),
            })?;
        Ok(Self(key))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; SESSION_KEY_SIZE] {
        &self.0
    }
}

impl Drop for SessionKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Encrypt a message under a room's session key.
///
/// A fresh random nonce is drawn per call; under one key a nonce is
/// never reused within the system's operational lifetime.
///
/// Returns the transportable blob described in the module docs.
pub fn encrypt_message<R: RngCore + CryptoRng>(
    plaintext: &[u8],
    key: &SessionKey,
    rng: &mut R,
) -> Vec<u8> {
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rng.fill_bytes(&mut nonce_bytes);
    #[allow(deprecated)] // generic-array 0.14 API; aes-gcm 0.10 still expects it
    let nonce = Nonce::from_slice(&nonce_bytes);

    let cipher = Aes256Gcm::new(key.as_bytes().into());

    let Ok(ciphertext) = cipher.encrypt(nonce, plaintext) else {
        unreachable!("AES-256-GCM encryption cannot fail with valid inputs");
    };

    let mut blob = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);
    blob
}

/// Decrypt a message blob under a room's session key.
///
/// # Errors
///
/// - [`CryptoError::Decryption`] if the blob is too short to contain a
///   nonce and tag
/// - [`CryptoError::AuthenticationFailure`] if the tag does not verify;
///   the plaintext is rejected entirely, never returned partially
pub fn decrypt_message(blob: &[u8], key: &SessionKey) -> Result<Vec<u8>, CryptoError> {
    if blob.len() < NONCE_SIZE + TAG_SIZE {
        return Err(CryptoError::Decryption {
            reason: format!(
                "blob of {} bytes is shorter than nonce ({NONCE_SIZE}) + tag ({TAG_SIZE})",
                blob.len()
            ),
        });
    }

    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_SIZE);
    #[allow(deprecated)] // generic-array 0.14 API; aes-gcm 0.10 still expects it
    let nonce = Nonce::from_slice(nonce_bytes);
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    cipher.decrypt(nonce, ciphertext).map_err(|_| CryptoError::AuthenticationFailure)
}
