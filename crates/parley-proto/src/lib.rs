//! Parley wire payloads.
//!
//! Typed payloads exchanged with the membership and transport
//! collaborators: room snapshots flowing in, composed encrypted
//! messages flowing out. The transport is JSON text; binary fields
//! (keys, ciphertext blobs, signatures, wrapped session keys) are
//! carried as base-64 strings.
//!
//! This crate defines shapes only. Nothing here touches key material or
//! performs cryptography; that is [`parley-crypto`]'s job, orchestrated
//! by the session controller.
//!
//! [`parley-crypto`]: ../parley_crypto/index.html

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod algorithms;
pub mod encoding;
mod error;
pub mod payloads;

pub use encoding::{decode_field, encode_bytes};
pub use error::ProtocolError;
pub use payloads::{
    MessageWire, OutgoingMessage, ParticipantWire, RoomSnapshot, SignaturesWire,
};
