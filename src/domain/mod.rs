//! Domain types shared by the probe and the chat protocol messages.

pub mod user_id;

pub use user_id::UserId;
