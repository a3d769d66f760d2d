//! im_sign — best-effort signatures for outgoing protocol packets
//!
//! A fixed set of commands must carry a signature obtained from an external
//! sign service. Everything else is sent unsigned without touching the
//! network. Failing to obtain a signature is never an error for the send
//! path: the packet simply goes out without one.
//!
//! # Modules
//! - `whitelist` — commands that require a signature, and the gate over them
//! - `client`    — single bounded HTTP call to the sign service
//! - `signer`    — `PacketSigner`, the provider bound to one endpoint
//! - `config`    — endpoint / user agent / extra command configuration
//! - `error`     — internal failure taxonomy (logged, never surfaced by `sign`)

pub mod client;
pub mod config;
pub mod error;
pub mod signer;
pub mod whitelist;

pub use client::{SignClient, SignResult, SIGN_TIMEOUT};
pub use config::SignConfig;
pub use error::SignError;
pub use signer::{PacketSigner, SignProvider, SignedPacket};
pub use whitelist::{CommandWhitelist, SignGate};
