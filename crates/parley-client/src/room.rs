//! Per-room session state.
//!
//! Each open room caches the unwrapped session key, the participant
//! public-key table, and work that arrived before the room reached
//! `Ready`. The session key is exclusively owned here; other components
//! only borrow it for a single operation.

use std::collections::{HashMap, VecDeque};

use parley_crypto::{SessionKey, VerifierKeys, import_ecdsa_public, import_rsa_public};
use parley_proto::{MessageWire, ParticipantWire, decode_field};

use crate::error::ClientError;

/// Lifecycle phase of one room within this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomPhase {
    /// Join requested; waiting for the first snapshot.
    Joining,
    /// Snapshot data present but no usable session key cached.
    KeyPending,
    /// Session key cached; sends and receives flow.
    Ready,
}

/// One participant's verification material.
pub(crate) struct Participant {
    /// Public signing keys, one per scheme.
    pub verifiers: VerifierKeys,
}

impl Participant {
    /// Import a participant's keys from their wire form.
    pub fn from_wire(wire: &ParticipantWire) -> Result<Self, ClientError> {
        let rsa_der = decode_field("rsa_signing_public_key", &wire.rsa_signing_public_key)?;
        let ecdsa_der = decode_field("ecdsa_signing_public_key", &wire.ecdsa_signing_public_key)?;

        Ok(Self {
            verifiers: VerifierKeys {
                rsa_pss: import_rsa_public(&rsa_der)?,
                ecdsa_p384: import_ecdsa_public(&ecdsa_der)?,
            },
        })
    }
}

/// State for one open room.
pub(crate) struct RoomState {
    /// Human-readable name from the latest snapshot.
    pub name: String,
    /// Participant keys from the latest snapshot.
    pub participants: HashMap<u64, Participant>,
    /// Cached session key; `Some` exactly in the `Ready` phase.
    pub session_key: Option<SessionKey>,
    /// Plaintexts queued while the room was not `Ready`.
    pub pending_sends: VecDeque<Vec<u8>>,
    /// Inbound messages queued while the room was not `Ready`.
    pub pending_inbound: VecDeque<MessageWire>,
}

impl RoomState {
    /// Fresh state for a just-requested join.
    pub fn joining() -> Self {
        Self {
            name: String::new(),
            participants: HashMap::new(),
            session_key: None,
            pending_sends: VecDeque::new(),
            pending_inbound: VecDeque::new(),
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> RoomPhase {
        if self.session_key.is_some() {
            RoomPhase::Ready
        } else if self.participants.is_empty() {
            RoomPhase::Joining
        } else {
            RoomPhase::KeyPending
        }
    }

    /// Drop the cached session key, re-entering `KeyPending`.
    ///
    /// Called on every room-state change; the stale key must never
    /// outlive the notification that made it stale.
    pub fn discard_key(&mut self) {
        self.session_key = None;
    }
}
