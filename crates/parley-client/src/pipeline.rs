//! Typed message pipelines.
//!
//! Send direction: plaintext → [`SignedMessage`] → [`SealedMessage`] →
//! [`OutgoingMessage`]. Receive direction: [`MessageWire`] →
//! [`OpenedMessage`] → verified plaintext.
//!
//! Each stage is a pure function of the previous stage's output, so
//! the mandatory ordering is structural: signatures are computed over
//! plaintext before encryption exists, and verification runs against
//! decrypted plaintext, never ciphertext. A failure at any stage aborts
//! the pipeline with the originating error.

use parley_crypto::{
    Identity, MessageSignatures, SessionKey, SignatureScheme, VerifierKeys, decrypt_message,
    encrypt_message, sign_both, verify_selected,
};
use parley_proto::{MessageWire, OutgoingMessage, SignaturesWire, decode_field, encode_bytes};
use rand::{CryptoRng, RngCore};

use crate::error::ClientError;

/// Stage one output: plaintext with both signatures attached.
#[derive(Debug, Clone)]
pub struct SignedMessage {
    /// The message plaintext.
    pub plaintext: Vec<u8>,
    /// Signatures over the plaintext, one per scheme.
    pub signatures: MessageSignatures,
}

/// Stage two output: ciphertext with the plaintext's signatures.
///
/// Signatures travel alongside the ciphertext unencrypted.
#[derive(Debug, Clone)]
pub struct SealedMessage {
    /// Encrypted blob (`nonce || ciphertext || tag`).
    pub ciphertext: Vec<u8>,
    /// Signatures over the original plaintext.
    pub signatures: MessageSignatures,
}

/// A received message after decryption, before verification.
#[derive(Debug, Clone)]
pub struct OpenedMessage {
    /// Claimed sender.
    pub sender_id: u64,
    /// Creation timestamp from the wire.
    pub created_at: String,
    /// Decrypted plaintext, not yet trusted.
    pub plaintext: Vec<u8>,
    /// Signatures carried alongside the ciphertext.
    pub signatures: MessageSignatures,
}

/// Sign plaintext under both of the sender's signing keys.
pub fn sign<R: RngCore + CryptoRng>(
    plaintext: Vec<u8>,
    identity: &Identity,
    rng: &mut R,
) -> SignedMessage {
    let signatures = sign_both(
        &plaintext,
        identity.rsa_signing_private(),
        identity.ecdsa_signing_private(),
        rng,
    );

    SignedMessage { plaintext, signatures }
}

/// Encrypt a signed message's plaintext under the room session key.
pub fn seal<R: RngCore + CryptoRng>(
    signed: SignedMessage,
    key: &SessionKey,
    rng: &mut R,
) -> SealedMessage {
    let ciphertext = encrypt_message(&signed.plaintext, key, rng);

    SealedMessage { ciphertext, signatures: signed.signatures }
}

/// Compose the wire form the transport collaborator expects.
pub fn compose(sealed: SealedMessage, sender_id: u64, room_id: u64) -> OutgoingMessage {
    OutgoingMessage {
        sender_id,
        room_id,
        ciphertext: encode_bytes(&sealed.ciphertext),
        signatures: SignaturesWire {
            rsa_pss: encode_bytes(&sealed.signatures.rsa_pss),
            ecdsa_p384: encode_bytes(&sealed.signatures.ecdsa_p384),
        },
    }
}

/// Decode and decrypt a wire message under the room session key.
pub fn open(message: &MessageWire, key: &SessionKey) -> Result<OpenedMessage, ClientError> {
    let blob = decode_field("ciphertext", &message.ciphertext)?;
    let rsa_pss = decode_field("RSA-PSS", &message.signatures.rsa_pss)?;
    let ecdsa_p384 = decode_field("ECDSA-P384", &message.signatures.ecdsa_p384)?;

    let plaintext = decrypt_message(&blob, key)?;

    Ok(OpenedMessage {
        sender_id: message.sender_id,
        created_at: message.created_at.clone(),
        plaintext,
        signatures: MessageSignatures { rsa_pss, ecdsa_p384 },
    })
}

/// Verify an opened message under the actively selected scheme.
///
/// Only the selected scheme's signature is consulted; a missing or
/// invalid signature for the other scheme is irrelevant here.
pub fn verify(
    opened: &OpenedMessage,
    scheme: SignatureScheme,
    sender_keys: &VerifierKeys,
) -> Result<(), ClientError> {
    verify_selected(scheme, &opened.plaintext, &opened.signatures, sender_keys)?;
    Ok(())
}
