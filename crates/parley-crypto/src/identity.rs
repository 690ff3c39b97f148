//! Identity key material: generation and interchange encoding.
//!
//! Each participant owns three long-lived pairs: one RSA-2048 pair for
//! session-key wrapping and a signing identity made of an RSA-PSS pair
//! and an ECDSA P-384 pair. The RSA signing pair is distinct from the
//! encryption pair; one key never serves both roles.
//!
//! Keys cross process boundaries only in standard self-describing
//! encodings: SPKI DER for public halves, PKCS#8 DER for private
//! halves. Persistence of the encoded bytes is the caller's
//! responsibility.

use p384::ecdsa::{SigningKey, VerifyingKey};
use pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rand::{CryptoRng, RngCore};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::error::CryptoError;

/// RSA modulus size for both the encryption and RSA signing pairs.
pub const RSA_MODULUS_BITS: usize = 2048;

/// The two signing pairs that make up a signing identity.
///
/// Both are generated together: the dual-signature strategy attaches
/// one signature per scheme to every outgoing message, so a sender
/// always needs both private halves at send time.
#[derive(Clone)]
pub struct SigningKeys {
    /// RSA-PSS private key (Scheme A).
    pub rsa: RsaPrivateKey,
    /// ECDSA P-384 private key (Scheme B).
    pub ecdsa: SigningKey,
}

/// Generate an RSA-2048 pair suited to public-key encryption.
pub fn generate_encryption_keys<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Result<RsaPrivateKey, CryptoError> {
    RsaPrivateKey::new(rng, RSA_MODULUS_BITS)
        .map_err(|e| CryptoError::KeyGeneration { reason: e.to_string() })
}

/// Generate a signing identity, independent of any encryption pair.
pub fn generate_signing_keys<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Result<SigningKeys, CryptoError> {
    let rsa = RsaPrivateKey::new(rng, RSA_MODULUS_BITS)
        .map_err(|e| CryptoError::KeyGeneration { reason: e.to_string() })?;
    let ecdsa = SigningKey::random(rng);

    Ok(SigningKeys { rsa, ecdsa })
}

/// A participant's complete local key material.
///
/// Constructed explicitly and handed to the session controller; no
/// component reads key material from ambient state. Private halves
/// never leave this value except through the explicit PKCS#8 export
/// functions below.
#[derive(Clone)]
pub struct Identity {
    user_id: u64,
    encryption: RsaPrivateKey,
    signing: SigningKeys,
}

impl Identity {
    /// Generate a fresh identity for a user.
    ///
    /// Done once at account setup; the pairs are long-lived and never
    /// rotated by this layer.
    pub fn generate<R: RngCore + CryptoRng>(
        rng: &mut R,
        user_id: u64,
    ) -> Result<Self, CryptoError> {
        let encryption = generate_encryption_keys(rng)?;
        let signing = generate_signing_keys(rng)?;

        Ok(Self { user_id, encryption, signing })
    }

    /// Reassemble an identity from previously exported private halves.
    pub fn from_parts(user_id: u64, encryption: RsaPrivateKey, signing: SigningKeys) -> Self {
        Self { user_id, encryption, signing }
    }

    /// Stable user ID this identity belongs to.
    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    /// Private encryption key, for unwrapping session keys.
    pub fn encryption_private(&self) -> &RsaPrivateKey {
        &self.encryption
    }

    /// Public encryption key, for others to wrap session keys to us.
    pub fn encryption_public(&self) -> RsaPublicKey {
        RsaPublicKey::from(&self.encryption)
    }

    /// Private RSA signing key (Scheme A).
    pub fn rsa_signing_private(&self) -> &RsaPrivateKey {
        &self.signing.rsa
    }

    /// Public RSA signing key (Scheme A).
    pub fn rsa_signing_public(&self) -> RsaPublicKey {
        RsaPublicKey::from(&self.signing.rsa)
    }

    /// Private ECDSA signing key (Scheme B).
    pub fn ecdsa_signing_private(&self) -> &SigningKey {
        &self.signing.ecdsa
    }

    /// Public ECDSA verifying key (Scheme B).
    pub fn ecdsa_signing_public(&self) -> VerifyingKey {
        *self.signing.ecdsa.verifying_key()
    }

    /// Export the three public halves as SPKI DER byte strings.
    pub fn public_keys(&self) -> Result<PublicKeySet, CryptoError> {
        Ok(PublicKeySet {
            user_id: self.user_id,
            encryption: export_rsa_public(&self.encryption_public())?,
            rsa_signing: export_rsa_public(&self.rsa_signing_public())?,
            ecdsa_signing: export_ecdsa_public(&self.ecdsa_signing_public())?,
        })
    }
}

/// A participant's exported public keys, as opaque SPKI DER bytes.
///
/// This is the shape that crosses process and network boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeySet {
    /// Owning user.
    pub user_id: u64,
    /// Encryption public key (RSA-2048).
    pub encryption: Vec<u8>,
    /// RSA signing public key (Scheme A).
    pub rsa_signing: Vec<u8>,
    /// ECDSA P-384 verifying key (Scheme B).
    pub ecdsa_signing: Vec<u8>,
}

/// Export an RSA public key as SPKI DER.
pub fn export_rsa_public(key: &RsaPublicKey) -> Result<Vec<u8>, CryptoError> {
    key.to_public_key_der()
        .map(|doc| doc.into_vec())
        .map_err(|e| CryptoError::KeyEncoding { reason: e.to_string() })
}

/// Import an RSA public key from SPKI DER.
pub fn import_rsa_public(der: &[u8]) -> Result<RsaPublicKey, CryptoError> {
    RsaPublicKey::from_public_key_der(der)
        .map_err(|e| CryptoError::KeyEncoding { reason: e.to_string() })
}

/// Export an RSA private key as PKCS#8 DER.
pub fn export_rsa_private(key: &RsaPrivateKey) -> Result<Vec<u8>, CryptoError> {
    key.to_pkcs8_der()
        .map(|doc| doc.as_bytes().to_vec())
        .map_err(|e| CryptoError::KeyEncoding { reason: e.to_string() })
}

/// Import an RSA private key from PKCS#8 DER.
pub fn import_rsa_private(der: &[u8]) -> Result<RsaPrivateKey, CryptoError> {
    RsaPrivateKey::from_pkcs8_der(der)
        .map_err(|e| CryptoError::KeyEncoding { reason: e.to_string() })
}

/// Export an ECDSA P-384 verifying key as SPKI DER.
pub fn export_ecdsa_public(key: &VerifyingKey) -> Result<Vec<u8>, CryptoError> {
    key.to_public_key_der()
        .map(|doc| doc.into_vec())
        .map_err(|e| CryptoError::KeyEncoding { reason: e.to_string() })
}

/// Import an ECDSA P-384 verifying key from SPKI DER.
pub fn import_ecdsa_public(der: &[u8]) -> Result<VerifyingKey, CryptoError> {
    VerifyingKey::from_public_key_der(der)
        .map_err(|e| CryptoError::KeyEncoding { reason: e.to_string() })
}

/// Export an ECDSA P-384 signing key as PKCS#8 DER.
pub fn export_ecdsa_private(key: &SigningKey) -> Result<Vec<u8>, CryptoError> {
    key.to_pkcs8_der()
        .map(|doc| doc.as_bytes().to_vec())
        .map_err(|e| CryptoError::KeyEncoding { reason: e.to_string() })
}

/// Import an ECDSA P-384 signing key from PKCS#8 DER.
pub fn import_ecdsa_private(der: &[u8]) -> Result<SigningKey, CryptoError> {
    SigningKey::from_pkcs8_der(der)
        .map_err(|e| CryptoError::KeyEncoding { reason: e.to_string() })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::OnceLock;

    use rand::rngs::OsRng;

    use super::{
        Identity, export_ecdsa_private, export_ecdsa_public, export_rsa_private,
        export_rsa_public, import_ecdsa_private, import_ecdsa_public, import_rsa_private,
        import_rsa_public,
    };

    // RSA generation is the slow part; share one identity across tests.
    fn test_identity() -> &'static Identity {
        static IDENTITY: OnceLock<Identity> = OnceLock::new();
        IDENTITY.get_or_init(|| Identity::generate(&mut OsRng, 7).unwrap())
    }

    #[test]
    fn signing_pair_is_independent_of_encryption_pair() {
        let identity = test_identity();
        assert_ne!(identity.encryption_public(), identity.rsa_signing_public());
    }

    #[test]
    fn rsa_public_roundtrip() {
        let identity = test_identity();
        let der = export_rsa_public(&identity.encryption_public()).unwrap();
        let restored = import_rsa_public(&der).unwrap();
        assert_eq!(restored, identity.encryption_public());
    }

    #[test]
    fn rsa_private_roundtrip() {
        let identity = test_identity();
        let der = export_rsa_private(identity.encryption_private()).unwrap();
        let restored = import_rsa_private(&der).unwrap();
        assert_eq!(&restored, identity.encryption_private());
    }

    #[test]
    fn ecdsa_public_roundtrip() {
        let identity = test_identity();
        let der = export_ecdsa_public(&identity.ecdsa_signing_public()).unwrap();
        let restored = import_ecdsa_public(&der).unwrap();
        assert_eq!(restored, identity.ecdsa_signing_public());
    }

    #[test]
    fn ecdsa_private_roundtrip() {
        let identity = test_identity();
        let der = export_ecdsa_private(identity.ecdsa_signing_private()).unwrap();
        let restored = import_ecdsa_private(&der).unwrap();
        assert_eq!(restored.verifying_key(), identity.ecdsa_signing_private().verifying_key());
    }

    #[test]
    fn malformed_key_bytes_are_rejected() {
        assert!(import_rsa_public(&[0x42; 16]).is_err());
        assert!(import_rsa_private(&[]).is_err());
        assert!(import_ecdsa_public(b"not a key").is_err());
        assert!(import_ecdsa_private(&[0xFF; 32]).is_err());
    }

    #[test]
    fn public_key_set_matches_exports() {
        let identity = test_identity();
        let set = identity.public_keys().unwrap();

        assert_eq!(set.user_id, 7);
        assert_eq!(set.encryption, export_rsa_public(&identity.encryption_public()).unwrap());
        assert_ne!(set.encryption, set.rsa_signing);
    }
}
