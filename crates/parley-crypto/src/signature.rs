//! Message signatures, polymorphic over two interchangeable schemes.
//!
//! Scheme A is RSA-PSS with SHA-256 and digest-length salt; Scheme B is
//! ECDSA over P-384 with SHA-384, signatures in fixed-width `r || s`
//! form. Every outgoing message carries one signature per scheme,
//! computed eagerly at send time, so a verifier can switch trusted
//! scheme at will without the sender resending.
//!
//! Signatures are always computed over plaintext, never ciphertext.
//! Dispatch is an exhaustive match on [`SignatureScheme`]; unknown
//! scheme tags exist only at the deserialization boundary.

use std::fmt;

use p384::ecdsa::{
    Signature as EcdsaSignature, SigningKey as EcdsaSigningKey, VerifyingKey as EcdsaVerifyingKey,
};
use rand::{CryptoRng, RngCore};
use rsa::{
    RsaPrivateKey, RsaPublicKey,
    pss::{Signature as PssSignature, SigningKey as PssSigningKey, VerifyingKey as PssVerifyingKey},
    signature::{RandomizedSigner, SignatureEncoding, Signer, Verifier},
};
use sha2::Sha256;

use crate::error::CryptoError;

/// The two supported signature scheme families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureScheme {
    /// Scheme A: RSA-PSS with SHA-256, digest-length salt.
    RsaPss,
    /// Scheme B: ECDSA over P-384 with SHA-384.
    EcdsaP384,
}

impl SignatureScheme {
    /// Wire tag for this scheme.
    pub fn tag(self) -> &'static str {
        match self {
            Self::RsaPss => "RSA-PSS",
            Self::EcdsaP384 => "ECDSA-P384",
        }
    }

    /// Parse a wire tag.
    ///
    /// This is the only place an unknown scheme can surface; everywhere
    /// else the scheme is an exhaustively matched enum.
    pub fn from_tag(tag: &str) -> Result<Self, CryptoError> {
        match tag {
            "RSA-PSS" => Ok(Self::RsaPss),
            "ECDSA-P384" => Ok(Self::EcdsaP384),
            other => Err(CryptoError::UnknownScheme { tag: other.to_string() }),
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One signature per scheme, attached to every outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSignatures {
    /// Scheme A signature bytes.
    pub rsa_pss: Vec<u8>,
    /// Scheme B signature bytes (fixed-width `r || s`).
    pub ecdsa_p384: Vec<u8>,
}

/// A sender's public signing keys, one per scheme.
#[derive(Debug, Clone)]
pub struct VerifierKeys {
    /// Scheme A public key.
    pub rsa_pss: RsaPublicKey,
    /// Scheme B verifying key.
    pub ecdsa_p384: EcdsaVerifyingKey,
}

/// Sign plaintext under Scheme A (RSA-PSS).
///
/// PSS is randomized; signing the same plaintext twice yields different
/// signatures that both verify.
pub fn sign_rsa_pss<R: RngCore + CryptoRng>(
    plaintext: &[u8],
    key: &RsaPrivateKey,
    rng: &mut R,
) -> Vec<u8> {
    let signing_key = PssSigningKey::<Sha256>::new(key.clone());

    let Ok(signature) = signing_key.try_sign_with_rng(rng, plaintext) else {
        unreachable!("RSA-PSS signing cannot fail with a valid private key");
    };

    signature.to_vec()
}

/// Verify a Scheme A signature over plaintext.
pub fn verify_rsa_pss(
    plaintext: &[u8],
    signature: &[u8],
    key: &RsaPublicKey,
) -> Result<(), CryptoError> {
    let mismatch = CryptoError::SignatureMismatch { scheme: SignatureScheme::RsaPss };

    let signature = PssSignature::try_from(signature).map_err(|_| mismatch)?;
    let verifying_key = PssVerifyingKey::<Sha256>::new(key.clone());

    verifying_key
        .verify(plaintext, &signature)
        .map_err(|_| CryptoError::SignatureMismatch { scheme: SignatureScheme::RsaPss })
}

/// Sign plaintext under Scheme B (ECDSA P-384).
pub fn sign_ecdsa_p384(plaintext: &[u8], key: &EcdsaSigningKey) -> Vec<u8> {
    let signature: EcdsaSignature = key.sign(plaintext);
    signature.to_bytes().to_vec()
}

/// Verify a Scheme B signature over plaintext.
pub fn verify_ecdsa_p384(
    plaintext: &[u8],
    signature: &[u8],
    key: &EcdsaVerifyingKey,
) -> Result<(), CryptoError> {
    let mismatch = CryptoError::SignatureMismatch { scheme: SignatureScheme::EcdsaP384 };

    let signature = EcdsaSignature::from_slice(signature).map_err(|_| mismatch)?;

    key.verify(plaintext, &signature)
        .map_err(|_| CryptoError::SignatureMismatch { scheme: SignatureScheme::EcdsaP384 })
}

/// Sign plaintext under both schemes at once.
///
/// The always-attach strategy: both signatures travel with every
/// message, and the verifier checks whichever scheme it currently
/// trusts.
pub fn sign_both<R: RngCore + CryptoRng>(
    plaintext: &[u8],
    rsa_key: &RsaPrivateKey,
    ecdsa_key: &EcdsaSigningKey,
    rng: &mut R,
) -> MessageSignatures {
    MessageSignatures {
        rsa_pss: sign_rsa_pss(plaintext, rsa_key, rng),
        ecdsa_p384: sign_ecdsa_p384(plaintext, ecdsa_key),
    }
}

/// Verify the signature matching the selected scheme.
///
/// Dispatches on the scheme tag to the matching verifier and the
/// matching public key. A signature from the other scheme never
/// verifies here; the tag decides, nothing is guessed.
pub fn verify_selected(
    scheme: SignatureScheme,
    plaintext: &[u8],
    signatures: &MessageSignatures,
    keys: &VerifierKeys,
) -> Result<(), CryptoError> {
    match scheme {
        SignatureScheme::RsaPss => {
            verify_rsa_pss(plaintext, &signatures.rsa_pss, &keys.rsa_pss)
        },
        SignatureScheme::EcdsaP384 => {
            verify_ecdsa_p384(plaintext, &signatures.ecdsa_p384, &keys.ecdsa_p384)
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::OnceLock;

    use rand::rngs::OsRng;

    use super::{
        MessageSignatures, SignatureScheme, VerifierKeys, sign_both, sign_ecdsa_p384,
        sign_rsa_pss, verify_ecdsa_p384, verify_rsa_pss, verify_selected,
    };
    use crate::{
        error::CryptoError,
        identity::{SigningKeys, generate_signing_keys},
    };

    fn signer() -> &'static SigningKeys {
        static KEYS: OnceLock<SigningKeys> = OnceLock::new();
        KEYS.get_or_init(|| generate_signing_keys(&mut OsRng).unwrap())
    }

    fn other_signer() -> &'static SigningKeys {
        static KEYS: OnceLock<SigningKeys> = OnceLock::new();
        KEYS.get_or_init(|| generate_signing_keys(&mut OsRng).unwrap())
    }

    fn verifier_keys(keys: &SigningKeys) -> VerifierKeys {
        VerifierKeys {
            rsa_pss: rsa::RsaPublicKey::from(&keys.rsa),
            ecdsa_p384: *keys.ecdsa.verifying_key(),
        }
    }

    #[test]
    fn rsa_pss_sign_verify() {
        let keys = signer();
        let plaintext = b"Hello, world!";

        let signature = sign_rsa_pss(plaintext, &keys.rsa, &mut OsRng);

        verify_rsa_pss(plaintext, &signature, &rsa::RsaPublicKey::from(&keys.rsa)).unwrap();
    }

    #[test]
    fn ecdsa_sign_verify() {
        let keys = signer();
        let plaintext = b"Hello, world!";

        let signature = sign_ecdsa_p384(plaintext, &keys.ecdsa);

        verify_ecdsa_p384(plaintext, &signature, keys.ecdsa.verifying_key()).unwrap();
    }

    #[test]
    fn altered_plaintext_fails_both_schemes() {
        let keys = signer();
        let signatures = sign_both(b"original", &keys.rsa, &keys.ecdsa, &mut OsRng);
        let verifiers = verifier_keys(keys);

        for scheme in [SignatureScheme::RsaPss, SignatureScheme::EcdsaP384] {
            let result = verify_selected(scheme, b"altered", &signatures, &verifiers);
            assert!(
                matches!(result, Err(CryptoError::SignatureMismatch { scheme: s }) if s == scheme)
            );
        }
    }

    #[test]
    fn wrong_public_key_fails_both_schemes() {
        let keys = signer();
        let wrong = verifier_keys(other_signer());
        let plaintext = b"key binding";

        let signatures = sign_both(plaintext, &keys.rsa, &keys.ecdsa, &mut OsRng);

        for scheme in [SignatureScheme::RsaPss, SignatureScheme::EcdsaP384] {
            assert!(verify_selected(scheme, plaintext, &signatures, &wrong).is_err());
        }
    }

    #[test]
    fn sign_both_verifies_under_either_scheme() {
        let keys = signer();
        let verifiers = verifier_keys(keys);
        let plaintext = b"Hello, world!";

        let signatures = sign_both(plaintext, &keys.rsa, &keys.ecdsa, &mut OsRng);

        verify_selected(SignatureScheme::RsaPss, plaintext, &signatures, &verifiers).unwrap();
        verify_selected(SignatureScheme::EcdsaP384, plaintext, &signatures, &verifiers).unwrap();
    }

    #[test]
    fn scheme_isolation() {
        // A Scheme A signature placed in the Scheme B slot (and vice
        // versa) must fail: dispatch is by tag, never guessed.
        let keys = signer();
        let verifiers = verifier_keys(keys);
        let plaintext = b"cross scheme";

        let signatures = sign_both(plaintext, &keys.rsa, &keys.ecdsa, &mut OsRng);
        let swapped = MessageSignatures {
            rsa_pss: signatures.ecdsa_p384.clone(),
            ecdsa_p384: signatures.rsa_pss.clone(),
        };

        assert!(
            verify_selected(SignatureScheme::RsaPss, plaintext, &swapped, &verifiers).is_err()
        );
        assert!(
            verify_selected(SignatureScheme::EcdsaP384, plaintext, &swapped, &verifiers).is_err()
        );
    }

    #[test]
    fn pss_is_randomized_but_always_verifies() {
        let keys = signer();
        let plaintext = b"salted";

        let sig1 = sign_rsa_pss(plaintext, &keys.rsa, &mut OsRng);
        let sig2 = sign_rsa_pss(plaintext, &keys.rsa, &mut OsRng);

        assert_ne!(sig1, sig2);
        let public = rsa::RsaPublicKey::from(&keys.rsa);
        verify_rsa_pss(plaintext, &sig1, &public).unwrap();
        verify_rsa_pss(plaintext, &sig2, &public).unwrap();
    }

    #[test]
    fn scheme_tag_roundtrip() {
        for scheme in [SignatureScheme::RsaPss, SignatureScheme::EcdsaP384] {
            assert_eq!(SignatureScheme::from_tag(scheme.tag()).unwrap(), scheme);
        }
    }

    #[test]
    fn unknown_tag_rejected_at_boundary() {
        let result = SignatureScheme::from_tag("ED25519");
        assert!(matches!(result, Err(CryptoError::UnknownScheme { tag }) if tag == "ED25519"));
    }
}
