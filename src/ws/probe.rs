//! Single request/response WebSocket probe.
//!
//! Connects once, sends one chat frame, waits a bounded time for one
//! reply, and closes. There is no retry and no read loop: whatever the
//! first data frame is, it is the answer.

use std::io::Write;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{WebSocketStream, connect_async_tls_with_config};

use super::messages::{ChatPayload, EncryptedContent, Envelope, ReplyKind, classify_reply};
use super::tls;
use crate::config::{ProbeConfig, TlsMode};
use crate::error::ProbeError;

/// Result of a probe run that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The server sent a data frame; holds its text.
    Received(String),
    /// Nothing arrived before the deadline.
    TimedOut,
}

/// One configured probe.
#[derive(Debug, Clone)]
pub struct Probe {
    config: ProbeConfig,
}

impl Probe {
    /// Creates a probe for `config`.
    #[must_use]
    pub const fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this probe runs with.
    #[must_use]
    pub const fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Builds the chat frame the probe sends.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Serialize`] if the placeholder content cannot
    /// be encoded.
    pub fn message(&self) -> Result<Envelope<ChatPayload>, ProbeError> {
        Ok(Envelope::chat(
            self.config.recipient,
            &EncryptedContent::placeholder(),
            self.config.temp_id.as_str(),
        )?)
    }

    /// Runs the probe with `token`, writing the transcript to `out`.
    ///
    /// The connection is closed before returning on every path after the
    /// upgrade succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection, the TLS handshake, the upgrade or
    /// the send fails, or if the server closes without replying. A timeout
    /// is [`ProbeOutcome::TimedOut`], not an error.
    pub async fn run<W: Write>(
        &self,
        token: &str,
        out: &mut W,
    ) -> Result<ProbeOutcome, ProbeError> {
        let url = self.config.url_with_token(token);

        if self.config.tls_mode == TlsMode::Insecure && url.starts_with("wss://") {
            writeln!(
                out,
                "WARNING: TLS certificate verification is disabled (testing only)"
            )?;
        }
        writeln!(out, "Connecting to WebSocket...")?;

        let connector = if url.starts_with("wss://") {
            tls::connector_for(self.config.tls_mode)?
        } else {
            None
        };
        let (mut ws, response) =
            connect_async_tls_with_config(url.as_str(), None, false, connector).await?;
        tracing::info!(
            url = %self.config.url,
            status = %response.status(),
            "websocket connected"
        );
        writeln!(out, "Connected!")?;

        let result = self.exchange(&mut ws, out).await;

        if let Err(e) = ws.close(None).await {
            tracing::debug!(error = %e, "close handshake failed");
        }

        result
    }

    /// Sends the chat frame and waits for the reply on an open socket.
    async fn exchange<S, W>(
        &self,
        ws: &mut WebSocketStream<S>,
        out: &mut W,
    ) -> Result<ProbeOutcome, ProbeError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
        W: Write,
    {
        let json = serde_json::to_string(&self.message()?)?;
        writeln!(out, "Sending: {json}")?;
        ws.send(Message::text(json)).await?;

        writeln!(out, "Waiting for response...")?;
        let deadline = Duration::from_secs(self.config.timeout_secs);
        let Ok(reply) = tokio::time::timeout(deadline, next_data_frame(ws)).await else {
            tracing::warn!(timeout_secs = self.config.timeout_secs, "no reply before deadline");
            writeln!(
                out,
                "No response received within {} seconds",
                self.config.timeout_secs
            )?;
            return Ok(ProbeOutcome::TimedOut);
        };
        let text = reply?;

        writeln!(out, "Received: {text}")?;
        log_reply(&text);
        Ok(ProbeOutcome::Received(text))
    }
}

/// Waits for the next text or binary frame, skipping control frames.
async fn next_data_frame<S>(ws: &mut WebSocketStream<S>) -> Result<String, ProbeError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    while let Some(frame) = ws.next().await {
        match frame? {
            Message::Text(text) => return Ok(text.as_str().to_owned()),
            Message::Binary(bytes) => return Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Message::Close(frame) => {
                tracing::debug!(?frame, "peer closed the connection");
                return Err(ProbeError::ConnectionClosed);
            }
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
        }
    }
    Err(ProbeError::ConnectionClosed)
}

fn log_reply(text: &str) {
    match classify_reply(text) {
        ReplyKind::Delivered {
            temp_id,
            message_id,
        } => tracing::info!(?temp_id, ?message_id, "delivered confirmation received"),
        ReplyKind::ServerError(message) => tracing::warn!(?message, "server returned an error"),
        ReplyKind::Other(msg_type) => tracing::info!(?msg_type, "unexpected message type"),
        ReplyKind::Unrecognized => tracing::debug!("reply is not a chat protocol frame"),
    }
}

/// Generates a time-based correlation id (`probe-<unix seconds>`).
#[must_use]
pub fn fresh_temp_id() -> String {
    format!("probe-{}", chrono::Utc::now().timestamp())
}
