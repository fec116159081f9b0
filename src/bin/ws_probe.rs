//! `ws-probe` entry point.
//!
//! Sends one chat frame to the development WebSocket endpoint and prints
//! the first reply. Exits 1 with a usage line when no token is given.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use chat_devtools::config::{ProbeConfig, TlsMode, validate_url};
use chat_devtools::domain::UserId;
use chat_devtools::telemetry::init_tracing;
use chat_devtools::ws::probe::fresh_temp_id;
use chat_devtools::ws::{Probe, ProbeOutcome};

/// One-shot WebSocket probe for the chat server.
#[derive(Debug, Parser)]
#[command(name = "ws-probe", version, about)]
struct Cli {
    /// Access token, sent as the `token` query parameter.
    token: Option<String>,

    /// Endpoint URL (overrides `WS_PROBE_URL`).
    #[arg(long)]
    url: Option<String>,

    /// Recipient user id (overrides `WS_PROBE_RECIPIENT`).
    #[arg(long)]
    to: Option<UserId>,

    /// Seconds to wait for a reply (overrides `WS_PROBE_TIMEOUT_SECS`).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Correlation id for the message (overrides `WS_PROBE_TEMP_ID`).
    #[arg(long, conflicts_with = "fresh_temp_id")]
    temp_id: Option<String>,

    /// Use a time-based correlation id instead of the fixed one.
    #[arg(long)]
    fresh_temp_id: bool,

    /// Verify the server certificate instead of accepting any.
    #[arg(long)]
    verify_tls: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the environment config.
    fn apply(&self, config: &mut ProbeConfig) -> Result<(), chat_devtools::error::ProbeError> {
        if let Some(url) = &self.url {
            validate_url(url)?;
            config.url.clone_from(url);
        }
        if let Some(to) = self.to {
            config.recipient = to;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = secs;
        }
        if let Some(temp_id) = &self.temp_id {
            config.temp_id.clone_from(temp_id);
        } else if self.fresh_temp_id {
            config.temp_id = fresh_temp_id();
        }
        if self.verify_tls {
            config.tls_mode = TlsMode::Verify;
        }
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing("info");

    let cli = Cli::parse();
    let Some(token) = cli.token.as_deref().filter(|t| !t.is_empty()) else {
        println!("Usage: ws-probe <token>");
        return Ok(ExitCode::from(1));
    };

    let mut config = ProbeConfig::from_env().context("loading configuration")?;
    cli.apply(&mut config).context("applying command-line options")?;

    let probe = Probe::new(config);
    tracing::debug!(
        url = %probe.config().url,
        recipient = %probe.config().recipient,
        timeout_secs = probe.config().timeout_secs,
        tls_mode = ?probe.config().tls_mode,
        "probe configured"
    );
    let mut out = std::io::stdout().lock();
    match probe.run(token, &mut out).await {
        Ok(ProbeOutcome::Received(_)) => tracing::debug!("probe finished with a reply"),
        Ok(ProbeOutcome::TimedOut) => tracing::debug!("probe finished without a reply"),
        Err(e) => {
            tracing::error!(kind = e.kind(), error = %e, "probe failed");
            return Err(e).context("probe failed");
        }
    }

    Ok(ExitCode::SUCCESS)
}
