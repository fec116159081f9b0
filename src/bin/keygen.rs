//! `keygen` entry point.
//!
//! Prints X25519 key pairs for the test users `F` and `N` and the SQL
//! that stores their public keys. Takes no arguments.

use anyhow::Context;

use chat_devtools::keys::KeyReport;
use chat_devtools::telemetry::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing("warn");

    let report = KeyReport::generate().context("generating key pairs")?;
    tracing::info!(pairs = report.entries().len(), "key pairs generated");
    print!("{report}");

    Ok(())
}
