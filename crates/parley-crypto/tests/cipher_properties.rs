//! Property-based tests for the message cipher.
//!
//! These tests verify the fundamental invariants of authenticated
//! message encryption:
//!
//! 1. **Round-trip**: decrypt(encrypt(m, k), k) == m for all messages
//! 2. **Tamper detection**: any single flipped byte rejects the message
//! 3. **Key binding**: a blob never decrypts under a different key
//! 4. **Layout**: blobs are nonce(12) || ciphertext || tag(16)

#![allow(clippy::unwrap_used)]

use parley_crypto::{
    CryptoError, NONCE_SIZE, SESSION_KEY_SIZE, SessionKey, TAG_SIZE, decrypt_message,
    encrypt_message,
};
use proptest::prelude::*;
use rand::rngs::OsRng;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn roundtrip_preserves_plaintext(
        plaintext in proptest::collection::vec(any::<u8>(), 0..4096),
        key_bytes in any::<[u8; SESSION_KEY_SIZE]>(),
    ) {
        let key = SessionKey::from_bytes(key_bytes);

        let blob = encrypt_message(&plaintext, &key, &mut OsRng);
        let decrypted = decrypt_message(&blob, &key).unwrap();

        prop_assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn blob_length_is_plaintext_plus_overhead(
        plaintext in proptest::collection::vec(any::<u8>(), 0..4096),
        key_bytes in any::<[u8; SESSION_KEY_SIZE]>(),
    ) {
        let key = SessionKey::from_bytes(key_bytes);

        let blob = encrypt_message(&plaintext, &key, &mut OsRng);

        prop_assert_eq!(blob.len(), NONCE_SIZE + plaintext.len() + TAG_SIZE);
    }

    #[test]
    fn single_byte_flip_is_always_detected(
        plaintext in proptest::collection::vec(any::<u8>(), 1..1024),
        key_bytes in any::<[u8; SESSION_KEY_SIZE]>(),
        index in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let key = SessionKey::from_bytes(key_bytes);

        let mut blob = encrypt_message(&plaintext, &key, &mut OsRng);
        let position = index.index(blob.len());
        blob[position] ^= flip;

        let result = decrypt_message(&blob, &key);
        prop_assert!(matches!(result, Err(CryptoError::AuthenticationFailure)));
    }

    #[test]
    fn different_key_never_decrypts(
        plaintext in proptest::collection::vec(any::<u8>(), 0..1024),
        key_bytes in any::<[u8; SESSION_KEY_SIZE]>(),
        other_bytes in any::<[u8; SESSION_KEY_SIZE]>(),
    ) {
        prop_assume!(key_bytes != other_bytes);

        let key = SessionKey::from_bytes(key_bytes);
        let other = SessionKey::from_bytes(other_bytes);

        let blob = encrypt_message(&plaintext, &key, &mut OsRng);

        prop_assert!(decrypt_message(&blob, &other).is_err());
    }
}
