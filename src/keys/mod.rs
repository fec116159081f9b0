//! Key generation for chat users.
//!
//! Produces X25519 key pairs compatible with the frontend's NaCl box
//! encryption and the SQL needed to register the public halves.

pub mod keypair;
pub mod report;

pub use keypair::{KEY_SIZE, KeyPair, decode_key_b64};
pub use report::{KeyReport, LabeledKeyPair, NICKNAMES, public_key_update};
