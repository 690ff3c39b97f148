//! Wire payload types.
//!
//! Shapes mirror what the membership collaborator sends on every room
//! query and what the controller hands the transport collaborator for
//! an outgoing message. All binary content is base-64 text.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// One signature per scheme, attached to every message on the wire.
///
/// Both signatures are computed over the plaintext at send time; a
/// verifier checks whichever scheme it currently trusts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignaturesWire {
    /// Scheme A signature, base-64.
    #[serde(rename = "RSA-PSS")]
    pub rsa_pss: String,

    /// Scheme B signature, base-64.
    #[serde(rename = "ECDSA-P384")]
    pub ecdsa_p384: String,
}

/// A message as carried by the transport.
///
/// `ciphertext` is the full cipher blob (`nonce || ciphertext || tag`)
/// in base-64. Signatures travel alongside the ciphertext unencrypted;
/// they were computed over the plaintext, never the ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageWire {
    /// Stable ID of the sending user.
    pub sender_id: u64,

    /// Creation timestamp, as formatted by the membership collaborator.
    pub created_at: String,

    /// Encrypted message blob, base-64.
    pub ciphertext: String,

    /// Dual signatures over the plaintext.
    pub signatures: SignaturesWire,
}

/// One room participant, with everything needed to verify their
/// messages and (on the distributing side) wrap keys to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantWire {
    /// Stable user ID.
    pub user_id: u64,

    /// Display name.
    pub username: String,

    /// Presence flag maintained by the membership collaborator.
    pub online: bool,

    /// Encryption public key, base-64 SPKI DER.
    pub encryption_public_key: String,

    /// Scheme A signing public key, base-64 SPKI DER.
    pub rsa_signing_public_key: String,

    /// Scheme B verifying key, base-64 SPKI DER.
    pub ecdsa_signing_public_key: String,
}

/// Full room state delivered by the membership collaborator.
///
/// Sent on join and again on every room-state change. Carries the
/// session key wrapped for the receiving participant specifically;
/// the plaintext session key never crosses this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    /// Room identifier.
    pub room_id: u64,

    /// Human-readable room name.
    pub room_name: String,

    /// Current participant set with their public keys.
    pub participants: Vec<ParticipantWire>,

    /// Message history, oldest first.
    pub messages: Vec<MessageWire>,

    /// Session key wrapped under the recipient's encryption public
    /// key, base-64.
    pub wrapped_session_key: String,
}

/// A composed encrypted message, ready for the transport collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    /// Sending user.
    pub sender_id: u64,

    /// Target room.
    pub room_id: u64,

    /// Encrypted message blob, base-64.
    pub ciphertext: String,

    /// Dual signatures over the plaintext.
    pub signatures: SignaturesWire,
}

impl RoomSnapshot {
    /// Decode a snapshot from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Encode a snapshot as JSON text.
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl OutgoingMessage {
    /// Decode an outgoing message from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Encode an outgoing message as JSON text.
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::{
        MessageWire, OutgoingMessage, ParticipantWire, RoomSnapshot, SignaturesWire,
    };

    fn sample_snapshot() -> RoomSnapshot {
        RoomSnapshot {
            room_id: 3,
            room_name: "ops".to_string(),
            participants: vec![ParticipantWire {
                user_id: 1,
                username: "alice".to_string(),
                online: true,
                encryption_public_key: "AAEC".to_string(),
                rsa_signing_public_key: "AwQF".to_string(),
                ecdsa_signing_public_key: "BgcI".to_string(),
            }],
            messages: vec![MessageWire {
                sender_id: 1,
                created_at: "08-30 12:00:00".to_string(),
                ciphertext: "enc".to_string(),
                signatures: SignaturesWire {
                    rsa_pss: "c2ln".to_string(),
                    ecdsa_p384: "c2ln".to_string(),
                },
            }],
            wrapped_session_key: "d3JhcHBlZA==".to_string(),
        }
    }

    #[test]
    fn snapshot_json_roundtrip() {
        let snapshot = sample_snapshot();
        let restored = RoomSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn signatures_use_scheme_tags_as_field_names() {
        let snapshot = sample_snapshot();
        let json = snapshot.to_json().unwrap();

        assert!(json.contains("\"RSA-PSS\""));
        assert!(json.contains("\"ECDSA-P384\""));
    }

    #[test]
    fn outgoing_json_roundtrip() {
        let outgoing = OutgoingMessage {
            sender_id: 9,
            room_id: 3,
            ciphertext: "YmxvYg==".to_string(),
            signatures: SignaturesWire {
                rsa_pss: "YQ==".to_string(),
                ecdsa_p384: "Yg==".to_string(),
            },
        };

        let restored = OutgoingMessage::from_json(&outgoing.to_json().unwrap()).unwrap();
        assert_eq!(restored, outgoing);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(RoomSnapshot::from_json("{\"room_id\": }").is_err());
    }
}
