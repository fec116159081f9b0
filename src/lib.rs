//! # chat-devtools
//!
//! Developer tools for the end-to-end encrypted chat backend.
//!
//! Two independent binaries share this library:
//!
//! - `ws-probe` opens one WebSocket connection with an access token, sends
//!   one chat frame, and prints the first reply or a timeout notice.
//! - `keygen` generates X25519 key pairs for two test users and prints the
//!   SQL that registers their public keys.
//!
//! ## Architecture
//!
//! ```text
//! ws-probe ── config ── ws::probe ── ws::tls (rustls)
//!                          │
//!                          └── ws::messages ── domain::UserId
//!
//! keygen ──── keys::report ── keys::keypair (x25519-dalek)
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod keys;
pub mod telemetry;
pub mod ws;
