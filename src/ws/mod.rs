//! WebSocket probe: protocol frames, TLS connector, and the probe run.
//!
//! The probe opens one connection to the chat endpoint, sends one `msg`
//! frame, and reports the first reply or a timeout.

pub mod messages;
pub mod probe;
pub mod tls;

pub use messages::{ChatPayload, EncryptedContent, Envelope, MessageType, ReplyKind};
pub use probe::{Probe, ProbeOutcome};
