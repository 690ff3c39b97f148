//! Chat session controller.
//!
//! Action-based state machine orchestrating the Parley protocol per
//! room: session-key unwrap and caching, the sign-then-encrypt send
//! pipeline, and the decrypt-then-verify receive pipeline.
//!
//! # Architecture
//!
//! The controller is sans-IO. It receives events ([`ClientEvent`]) from
//! the membership and transport collaborators, processes them through
//! pure state machine logic, and returns actions ([`ClientAction`]) for
//! the caller to execute. Every cryptographic operation runs inside a
//! single `handle()` call on `&mut self`, so a session-key replacement
//! can never interleave with a decryption under the old key.
//!
//! # Room lifecycle
//!
//! ```text
//! (no room) ──JoinRoom──▶ Joining ──snapshot──▶ KeyPending ──unwrap──▶ Ready
//!     ▲                                              ▲                  │
//!     └───────────────LeaveRoom (any phase)──────────┴──RoomChanged─────┘
//! ```
//!
//! Sends and inbound messages arriving before `Ready` are queued and
//! processed in order once the session key is cached; nothing blocks.
//!
//! # Components
//!
//! - [`Client`]: per-room state machine over an explicit [`Identity`]
//! - [`ClientEvent`] / [`ClientAction`]: the sans-IO seam
//! - [`pipeline`]: typed send/receive stages

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod error;
mod event;
pub mod pipeline;
mod room;

pub use client::Client;
pub use error::ClientError;
pub use event::{ClientAction, ClientEvent};
pub use parley_crypto::{Identity, SignatureScheme};
pub use room::RoomPhase;
