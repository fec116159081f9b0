//! Probe configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`) and fall back to the values the chat backend uses for local
//! development. Command-line flags of `ws-probe` override them.

use crate::domain::UserId;
use crate::error::ProbeError;

/// WebSocket endpoint of the local development server.
pub const DEFAULT_URL: &str = "wss://127.0.0.1:9443/ws";

/// Recipient of the probe message.
pub const DEFAULT_RECIPIENT: UserId =
    UserId::from_uuid(uuid::uuid!("fcf454d3-d34a-4765-bc75-e9c3aa4bd9c3"));

/// Client correlation id sent with the probe message.
pub const DEFAULT_TEMP_ID: &str = "test-temp-id-123";

/// Seconds to wait for the single reply.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// How the probe treats the server certificate on `wss://` URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// Full chain and hostname verification against the webpki roots.
    Verify,
    /// No chain or hostname verification. Testing only: accepts any
    /// certificate, including self-signed ones.
    Insecure,
}

/// Settings for a single probe run.
///
/// Loaded once at startup via [`ProbeConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Endpoint URL without the token query parameter.
    pub url: String,

    /// Recipient user of the chat message.
    pub recipient: UserId,

    /// Correlation id placed in the message payload.
    pub temp_id: String,

    /// Seconds to wait for a reply before giving up.
    pub timeout_secs: u64,

    /// Certificate verification mode for TLS connections.
    pub tls_mode: TlsMode,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            recipient: DEFAULT_RECIPIENT,
            temp_id: DEFAULT_TEMP_ID.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            tls_mode: TlsMode::Insecure,
        }
    }
}

impl ProbeConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Config`] if `WS_PROBE_RECIPIENT` is set but is
    /// not a UUID, or if `WS_PROBE_URL` is not a `ws://`/`wss://` URL.
    pub fn from_env() -> Result<Self, ProbeError> {
        dotenvy::dotenv().ok();

        let url = std::env::var("WS_PROBE_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        validate_url(&url)?;

        let recipient = match std::env::var("WS_PROBE_RECIPIENT") {
            Ok(value) => value
                .parse::<UserId>()
                .map_err(|e| ProbeError::Config(format!("WS_PROBE_RECIPIENT: {e}")))?,
            Err(_) => DEFAULT_RECIPIENT,
        };

        let temp_id =
            std::env::var("WS_PROBE_TEMP_ID").unwrap_or_else(|_| DEFAULT_TEMP_ID.to_string());
        let timeout_secs = parse_env("WS_PROBE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);

        let tls_mode = if parse_env_bool("WS_PROBE_INSECURE_TLS", true) {
            TlsMode::Insecure
        } else {
            TlsMode::Verify
        };

        Ok(Self {
            url,
            recipient,
            temp_id,
            timeout_secs,
            tls_mode,
        })
    }

    /// Returns the connection URL with `token` appended as a query parameter.
    ///
    /// The token is appended verbatim.
    #[must_use]
    pub fn url_with_token(&self, token: &str) -> String {
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{separator}token={token}", self.url)
    }
}

/// Checks that `url` uses a WebSocket scheme.
///
/// # Errors
///
/// Returns [`ProbeError::Config`] for any other scheme.
pub fn validate_url(url: &str) -> Result<(), ProbeError> {
    if url.starts_with("ws://") || url.starts_with("wss://") {
        Ok(())
    } else {
        Err(ProbeError::Config(format!(
            "url must start with ws:// or wss://, got {url}"
        )))
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
pub(crate) fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().map(|v| v.to_ascii_lowercase()).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}
