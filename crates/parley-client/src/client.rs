//! Chat session controller.
//!
//! [`Client`] owns the room table and the caller's identity, and turns
//! [`ClientEvent`]s into [`ClientAction`]s without performing any I/O
//! itself. All key material flows through here: wrapped session keys
//! are unwrapped against the identity's encryption key, cached per
//! room, and discarded the moment a room-state change makes them
//! suspect.

use std::collections::HashMap;

use parley_crypto::{Identity, SignatureScheme, unwrap_session_key};
use parley_proto::{MessageWire, RoomSnapshot, decode_field};
use rand::{CryptoRng, RngCore};

use crate::error::ClientError;
use crate::event::{ClientAction, ClientEvent};
use crate::pipeline::{self, OpenedMessage};
use crate::room::{Participant, RoomPhase, RoomState};

/// The session controller.
///
/// Single-threaded by construction: every event is handled to
/// completion before the next one starts, so a key swap can never
/// interleave with an in-flight decrypt.
pub struct Client<R: RngCore + CryptoRng> {
    rng: R,
    identity: Identity,
    scheme: SignatureScheme,
    rooms: HashMap<u64, RoomState>,
}

impl<R: RngCore + CryptoRng> Client<R> {
    /// Create a controller for the given identity.
    ///
    /// Verification starts under [`SignatureScheme::RsaPss`]; switch
    /// with [`ClientEvent::SelectScheme`].
    pub fn new(rng: R, identity: Identity) -> Self {
        Self {
            rng,
            identity,
            scheme: SignatureScheme::RsaPss,
            rooms: HashMap::new(),
        }
    }

    /// This client's stable user ID.
    pub fn user_id(&self) -> u64 {
        self.identity.user_id()
    }

    /// The scheme currently used for signature verification.
    pub fn selected_scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// Whether the client has state for the given room.
    pub fn is_member(&self, room_id: u64) -> bool {
        self.rooms.contains_key(&room_id)
    }

    /// Number of rooms the client has state for.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Lifecycle phase of one room, if open.
    pub fn phase(&self, room_id: u64) -> Option<RoomPhase> {
        self.rooms.get(&room_id).map(RoomState::phase)
    }

    /// Display name of one room, from its latest snapshot.
    pub fn room_name(&self, room_id: u64) -> Option<&str> {
        self.rooms.get(&room_id).map(|room| room.name.as_str())
    }

    /// Number of sends queued for a room that has not reached `Ready`.
    pub fn queued_sends(&self, room_id: u64) -> Option<usize> {
        self.rooms.get(&room_id).map(|room| room.pending_sends.len())
    }

    /// Process one event, returning the actions the caller must run.
    ///
    /// # Errors
    ///
    /// Returns an error when the event references unknown state or a
    /// cryptographic step fails in a way that is not attributable to a
    /// single message (for example the wrapped session key in a
    /// snapshot does not unwrap). Per-message failures do not error;
    /// they surface as [`ClientAction::MessageRejected`].
    pub fn handle(&mut self, event: ClientEvent) -> Result<Vec<ClientAction>, ClientError> {
        match event {
            ClientEvent::JoinRoom { room_id } => self.handle_join(room_id),
            ClientEvent::SnapshotReceived(snapshot) => self.handle_snapshot(snapshot),
            ClientEvent::SendMessage { room_id, plaintext } => self.handle_send(room_id, plaintext),
            ClientEvent::MessageReceived { room_id, message } => {
                self.handle_message(room_id, message)
            }
            ClientEvent::RoomChanged { room_id } => self.handle_room_changed(room_id),
            ClientEvent::SelectScheme { scheme } => {
                tracing::info!(?scheme, "signature scheme selected");
                self.scheme = scheme;
                Ok(Vec::new())
            }
            ClientEvent::LeaveRoom { room_id } => self.handle_leave(room_id),
        }
    }

    fn handle_join(&mut self, room_id: u64) -> Result<Vec<ClientAction>, ClientError> {
        if self.rooms.contains_key(&room_id) {
            return Err(ClientError::AlreadyJoined { room_id });
        }

        self.rooms.insert(room_id, RoomState::joining());
        tracing::info!(room_id, "join requested");

        Ok(vec![ClientAction::RequestSnapshot { room_id }])
    }

    /// Install a room snapshot: refresh the participant table, unwrap
    /// the session key, then work through everything that was waiting
    /// on it (history, queued inbound, queued sends).
    fn handle_snapshot(&mut self, snapshot: RoomSnapshot) -> Result<Vec<ClientAction>, ClientError> {
        let room_id = snapshot.room_id;
        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or(ClientError::RoomNotFound { room_id })?;

        let mut actions = Vec::new();

        // Members present before but absent now still hold the old
        // key; it must not encrypt anything further.
        let removed: Vec<u64> = room
            .participants
            .keys()
            .copied()
            .filter(|id| !snapshot.participants.iter().any(|p| p.user_id == *id))
            .collect();
        if !removed.is_empty() {
            tracing::warn!(room_id, ?removed, "participants removed, demanding key rotation");
            actions.push(ClientAction::RequestKeyRotation { room_id, removed });
        }

        room.name = snapshot.room_name.clone();
        room.participants.clear();
        for wire in &snapshot.participants {
            room.participants.insert(wire.user_id, Participant::from_wire(wire)?);
        }

        room.discard_key();
        let wrapped = decode_field("wrapped_session_key", &snapshot.wrapped_session_key)?;
        let key = unwrap_session_key(&wrapped, self.identity.encryption_private())?;
        room.session_key = Some(key);
        tracing::debug!(room_id, participants = room.participants.len(), "room ready");

        // The snapshot's history includes anything that arrived while
        // the key was pending, so drop queued duplicates.
        let queued: Vec<MessageWire> = room
            .pending_inbound
            .drain(..)
            .filter(|m| !snapshot.messages.iter().any(|h| h.ciphertext == m.ciphertext))
            .collect();
        let to_send: Vec<Vec<u8>> = room.pending_sends.drain(..).collect();

        let room = self
            .rooms
            .get(&room_id)
            .ok_or(ClientError::RoomNotFound { room_id })?;
        for wire in snapshot.messages.iter().chain(queued.iter()) {
            actions.push(self.process_inbound(room_id, room, wire));
        }

        for plaintext in to_send {
            actions.push(self.compose_send(room_id, plaintext)?);
        }

        Ok(actions)
    }

    fn handle_send(
        &mut self,
        room_id: u64,
        plaintext: Vec<u8>,
    ) -> Result<Vec<ClientAction>, ClientError> {
        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or(ClientError::RoomNotFound { room_id })?;

        if room.phase() != RoomPhase::Ready {
            tracing::debug!(room_id, "send queued until session key is cached");
            room.pending_sends.push_back(plaintext);
            return Ok(Vec::new());
        }

        Ok(vec![self.compose_send(room_id, plaintext)?])
    }

    fn handle_message(
        &mut self,
        room_id: u64,
        message: MessageWire,
    ) -> Result<Vec<ClientAction>, ClientError> {
        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or(ClientError::RoomNotFound { room_id })?;

        if room.phase() != RoomPhase::Ready {
            tracing::debug!(room_id, "inbound queued until session key is cached");
            room.pending_inbound.push_back(message);
            return Ok(Vec::new());
        }

        let room = self
            .rooms
            .get(&room_id)
            .ok_or(ClientError::RoomNotFound { room_id })?;
        Ok(vec![self.process_inbound(room_id, room, &message)])
    }

    fn handle_room_changed(&mut self, room_id: u64) -> Result<Vec<ClientAction>, ClientError> {
        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or(ClientError::RoomNotFound { room_id })?;

        room.discard_key();
        tracing::info!(room_id, "room changed, session key discarded");

        Ok(vec![ClientAction::RequestSnapshot { room_id }])
    }

    fn handle_leave(&mut self, room_id: u64) -> Result<Vec<ClientAction>, ClientError> {
        if self.rooms.remove(&room_id).is_none() {
            return Err(ClientError::RoomNotFound { room_id });
        }

        tracing::info!(room_id, "room left, state discarded");
        Ok(vec![ClientAction::RoomLeft { room_id }])
    }

    /// Run one queued or fresh plaintext through sign, seal, compose.
    ///
    /// The room must be `Ready`; callers check.
    fn compose_send(&mut self, room_id: u64, plaintext: Vec<u8>) -> Result<ClientAction, ClientError> {
        let room = self
            .rooms
            .get(&room_id)
            .ok_or(ClientError::RoomNotFound { room_id })?;
        let key = room
            .session_key
            .clone()
            .ok_or(ClientError::KeyMissing { room_id })?;

        let signed = pipeline::sign(plaintext, &self.identity, &mut self.rng);
        let sealed = pipeline::seal(signed, &key, &mut self.rng);
        Ok(ClientAction::Send(pipeline::compose(
            sealed,
            self.identity.user_id(),
            room_id,
        )))
    }

    /// Decrypt and verify one inbound message.
    ///
    /// Failures are contained to the message: the action stream reports
    /// a rejection and processing continues.
    fn process_inbound(&self, room_id: u64, room: &RoomState, wire: &MessageWire) -> ClientAction {
        match self.open_and_verify(room_id, room, wire) {
            Ok(opened) => ClientAction::DeliverMessage {
                room_id,
                sender_id: opened.sender_id,
                plaintext: opened.plaintext,
                created_at: opened.created_at,
            },
            Err(error) => {
                tracing::warn!(room_id, sender_id = wire.sender_id, %error, "message rejected");
                ClientAction::MessageRejected {
                    room_id,
                    sender_id: wire.sender_id,
                    reason: error.to_string(),
                }
            }
        }
    }

    fn open_and_verify(
        &self,
        room_id: u64,
        room: &RoomState,
        wire: &MessageWire,
    ) -> Result<OpenedMessage, ClientError> {
        let key = room
            .session_key
            .as_ref()
            .ok_or(ClientError::KeyMissing { room_id })?;

        let sender = room
            .participants
            .get(&wire.sender_id)
            .ok_or(ClientError::UnknownParticipant { room_id, user_id: wire.sender_id })?;

        let opened = pipeline::open(wire, key)?;
        pipeline::verify(&opened, self.scheme, &sender.verifiers)?;

        Ok(opened)
    }
}
