//! X25519 key pairs encoded as base64 text.
//!
//! The private key is 32 bytes straight from the OS random source; the
//! public key is derived with X25519 scalar multiplication (clamping is
//! applied during derivation, the stored private bytes are not modified),
//! which matches NaCl `crypto_box` key pairs.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use rand::RngCore;
use rand::rngs::OsRng;
use x25519_dalek::{PublicKey, StaticSecret};

use crate::error::KeyError;

/// Size in bytes of both the private and the public key.
pub const KEY_SIZE: usize = 32;

/// An X25519 key pair.
#[derive(Clone)]
pub struct KeyPair {
    secret: StaticSecret,
    public: PublicKey,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public_b64())
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl KeyPair {
    /// Generates a key pair from [`KEY_SIZE`] bytes of OS randomness.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Entropy`] if the OS random source fails.
    pub fn generate() -> Result<Self, KeyError> {
        let mut bytes = [0u8; KEY_SIZE];
        OsRng.try_fill_bytes(&mut bytes)?;
        Ok(Self::from_private_bytes(bytes))
    }

    /// Builds a key pair from raw private key bytes.
    #[must_use]
    pub fn from_private_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        let secret = StaticSecret::from(bytes);
        let public = PublicKey::from(&secret);
        Self { secret, public }
    }

    /// Builds a key pair from a base64 private key.
    ///
    /// # Errors
    ///
    /// Returns an error if `encoded` is not base64 or not [`KEY_SIZE`] bytes.
    pub fn from_private_b64(encoded: &str) -> Result<Self, KeyError> {
        decode_key_b64(encoded).map(Self::from_private_bytes)
    }

    /// Returns the raw public key bytes.
    #[must_use]
    pub fn public_bytes(&self) -> [u8; KEY_SIZE] {
        *self.public.as_bytes()
    }

    /// Returns the raw private key bytes.
    #[must_use]
    pub fn private_bytes(&self) -> [u8; KEY_SIZE] {
        self.secret.to_bytes()
    }

    /// Returns the public key as standard padded base64.
    #[must_use]
    pub fn public_b64(&self) -> String {
        BASE64.encode(self.public.as_bytes())
    }

    /// Returns the private key as standard padded base64.
    #[must_use]
    pub fn private_b64(&self) -> String {
        BASE64.encode(self.secret.as_bytes())
    }
}

/// Decodes a base64 key into exactly [`KEY_SIZE`] bytes.
///
/// # Errors
///
/// Returns [`KeyError::Base64`] for malformed input and
/// [`KeyError::InvalidKeyLength`] if the decoded size is wrong.
pub fn decode_key_b64(encoded: &str) -> Result<[u8; KEY_SIZE], KeyError> {
    let decoded = BASE64.decode(encoded)?;
    <[u8; KEY_SIZE]>::try_from(decoded.as_slice()).map_err(|_| KeyError::InvalidKeyLength {
        expected: KEY_SIZE,
        actual: decoded.len(),
    })
}
