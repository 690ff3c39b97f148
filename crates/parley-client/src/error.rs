//! Controller error types.

use parley_crypto::CryptoError;
use parley_proto::ProtocolError;
use thiserror::Error;

/// Errors from session controller operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Event referenced a room this client has not joined
    #[error("room not found: {room_id}")]
    RoomNotFound {
        /// Room the event referenced
        room_id: u64,
    },

    /// Join requested for a room that is already active
    #[error("already joined room {room_id}")]
    AlreadyJoined {
        /// Room that is already active
        room_id: u64,
    },

    /// Operation needs the session key but none is cached
    #[error("no session key cached for room {room_id}")]
    KeyMissing {
        /// Room whose key is absent
        room_id: u64,
    },

    /// A message referenced a sender outside the room's participant set
    #[error("unknown participant {user_id} in room {room_id}")]
    UnknownParticipant {
        /// Room the message arrived in
        room_id: u64,
        /// Sender that is not a participant
        user_id: u64,
    },

    /// A cryptographic operation failed
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// A wire payload could not be decoded
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
