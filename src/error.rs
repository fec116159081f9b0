//! Error types for the probe and the key generator.
//!
//! [`ProbeError`] covers everything that can abort a WebSocket probe run;
//! [`KeyError`] covers key generation and decoding. A receive timeout is
//! not an error: it is reported as [`crate::ws::ProbeOutcome::TimedOut`].

/// Failure of a WebSocket probe run.
///
/// Every variant is fatal: the binary prints it and exits non-zero.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// Invalid configuration value (environment or command line).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Connection, handshake or transport failure from the WebSocket layer.
    #[error("websocket error: {0}")]
    Connect(#[from] tokio_tungstenite::tungstenite::Error),

    /// TLS client configuration could not be built.
    #[error("tls error: {0}")]
    Tls(#[from] rustls::Error),

    /// The outgoing message could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The peer closed the connection before sending a data frame.
    #[error("connection closed before a response arrived")]
    ConnectionClosed,

    /// Writing the probe transcript failed.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

impl ProbeError {
    /// Returns a short, stable label for the error category.
    ///
    /// Used as a structured logging field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Connect(_) => "connect",
            Self::Tls(_) => "tls",
            Self::Serialize(_) => "serialize",
            Self::ConnectionClosed => "closed",
            Self::Output(_) => "output",
        }
    }
}

/// Failure while generating, encoding or decoding an X25519 key.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    /// The operating system random source failed.
    #[error("secure random source failed: {0}")]
    Entropy(#[from] rand::Error),

    /// A key string was not valid base64.
    #[error("invalid base64 key: {0}")]
    Base64(#[from] base64::DecodeError),

    /// A decoded key had the wrong size.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Required key length in bytes.
        expected: usize,
        /// Length actually decoded.
        actual: usize,
    },
}
