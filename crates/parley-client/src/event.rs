//! Controller events and actions.

use parley_crypto::SignatureScheme;
use parley_proto::{MessageWire, OutgoingMessage, RoomSnapshot};

/// Events the caller feeds into the controller.
///
/// The caller is responsible for:
/// - Receiving room snapshots and messages from the network
/// - Forwarding application intents (join, send, leave)
/// - Relaying room-state-change notifications
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// Application wants to join a room.
    JoinRoom {
        /// Room to join.
        room_id: u64,
    },

    /// Room snapshot arrived from the membership collaborator.
    ///
    /// Carries the participant set, the wrapped session key for this
    /// client, and the room's message history.
    SnapshotReceived(RoomSnapshot),

    /// Application wants to send a message.
    ///
    /// Queued if the room has not reached `Ready`; queued sends flush
    /// in order once the session key is cached.
    SendMessage {
        /// Target room.
        room_id: u64,
        /// Message plaintext.
        plaintext: Vec<u8>,
    },

    /// A single message arrived for an open room.
    MessageReceived {
        /// Room the message belongs to.
        room_id: u64,
        /// The wire message.
        message: MessageWire,
    },

    /// The membership collaborator reports a room-state change
    /// (member added or removed, presence change).
    ///
    /// The controller discards its cached session key and re-requests
    /// the snapshot; a changed wrapped-key assignment may have been
    /// issued for this participant.
    RoomChanged {
        /// Room that changed.
        room_id: u64,
    },

    /// Application switched the trusted signature scheme.
    ///
    /// Takes effect for all subsequent verification.
    SelectScheme {
        /// Scheme to verify under from now on.
        scheme: SignatureScheme,
    },

    /// Application wants to leave a room.
    LeaveRoom {
        /// Room to leave.
        room_id: u64,
    },
}

/// Actions the controller produces for the caller to execute.
#[derive(Debug, Clone)]
pub enum ClientAction {
    /// Ask the membership collaborator for a fresh room snapshot.
    RequestSnapshot {
        /// Room to query.
        room_id: u64,
    },

    /// Hand a composed encrypted message to the transport collaborator.
    Send(OutgoingMessage),

    /// Deliver a decrypted, verified plaintext to the display layer.
    DeliverMessage {
        /// Room the message is from.
        room_id: u64,
        /// Sender's stable ID.
        sender_id: u64,
        /// Verified plaintext.
        plaintext: Vec<u8>,
        /// Creation timestamp from the wire.
        created_at: String,
    },

    /// A message was dropped from display.
    ///
    /// Emitted alongside a logged reason whenever decryption or
    /// verification fails; the plaintext is never delivered.
    MessageRejected {
        /// Room the message arrived in.
        room_id: u64,
        /// Claimed sender.
        sender_id: u64,
        /// Why it was dropped.
        reason: String,
    },

    /// Demand a fresh session key from the key authority.
    ///
    /// Emitted when a snapshot shows previously known participants are
    /// gone: their cached copy of the old key must not stay usable for
    /// future messages, so the room key has to be rotated and
    /// re-wrapped for the remaining participants.
    RequestKeyRotation {
        /// Room whose key must rotate.
        room_id: u64,
        /// Participants that were removed.
        removed: Vec<u64>,
    },

    /// Room state was discarded after a leave.
    RoomLeft {
        /// Room that was left.
        room_id: u64,
    },
}
