//! Shared glue for the edgeflow binaries
//!
//! Each binary parses its own flags, flattens [`CredentialArgs`] into them,
//! and reports progress through one of the observers in [`progress`].

pub mod progress;

use anyhow::Context;
use clap::Args;
use edgeflow_client::EdgeGridClient;
use edgeflow_config::{Credentials, DEFAULT_EDGERC, DEFAULT_SECTION};
use edgeflow_core::{PollConfig, Reconciler};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

pub use progress::{SettingsProgress, WaiterProgress};

/// Credential file selection shared by every binary
#[derive(Args, Debug, Clone)]
pub struct CredentialArgs {
    /// Path to the .edgerc credential file
    #[arg(long, env = "EDGERC", default_value = DEFAULT_EDGERC)]
    pub edgerc: PathBuf,

    /// Section of the credential file to use
    #[arg(long, env = "EDGERC_SECTION", default_value = DEFAULT_SECTION)]
    pub section: String,

    /// Print debug logs to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or
/// everything from debug up with `--verbose`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Load credentials and build an engine over a signed client
pub fn connect(args: &CredentialArgs) -> anyhow::Result<Reconciler<EdgeGridClient>> {
    let credentials = Credentials::load(&args.edgerc, &args.section)
        .context("Failed to load credentials")?;
    let client = EdgeGridClient::new(&credentials).context("Failed to create API client")?;

    tracing::debug!("Using API host {}", client.base_url());
    Ok(Reconciler::new(client))
}

/// Poll settings from an interval in seconds and a timeout in minutes
pub fn poll_config(interval_secs: u64, timeout_minutes: u64) -> anyhow::Result<PollConfig> {
    let config = PollConfig::new(
        Duration::from_secs(interval_secs),
        Duration::from_secs(timeout_minutes.saturating_mul(60)),
    )?;
    Ok(config)
}
