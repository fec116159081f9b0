//! Tracing subscriber setup shared by both binaries.
//!
//! Logs are written to stderr: stdout carries the tool output that users
//! copy (key material, SQL, probe transcript).

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::parse_env_bool;

/// Initializes the global tracing subscriber.
///
/// * `default_filter` -- filter used when `RUST_LOG` is unset or invalid.
///
/// Set `LOG_JSON=true` for JSON log lines. Calling this twice is a no-op.
pub fn init_tracing(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let result = if parse_env_bool("LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
