//! Set bot management settings on a security policy and wait until they apply

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use edgeflow::{CredentialArgs, SettingsProgress, connect, init_tracing, poll_config};
use edgeflow_core::{
    BotManagementResource, BotManagementSettings, ConfigId, PolicyId, SettingsResource,
};

#[derive(Parser, Debug)]
#[command(name = "botman-settings", version)]
#[command(about = "Push bot management settings to a security policy and verify them", long_about = None)]
struct Cli {
    #[command(flatten)]
    credentials: CredentialArgs,

    /// Security configuration ID
    #[arg(long)]
    config_id: ConfigId,

    /// Security policy ID
    #[arg(long)]
    security_policy_id: PolicyId,

    /// Desired settings as JSON, e.g. '{"enableBotManagement": true}'
    #[arg(long)]
    payload: String,

    /// Seconds between verification checks
    #[arg(long, default_value_t = 5)]
    interval: u64,

    /// Minutes to wait for the settings to apply
    #[arg(long, default_value_t = 5)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.credentials.verbose);

    let desired = BotManagementSettings::from_json(&cli.payload).context("Invalid --payload")?;
    let poll = poll_config(cli.interval, cli.timeout)?;
    let reconciler = connect(&cli.credentials)?;

    let resource = BotManagementResource::new(cli.config_id, cli.security_policy_id);
    let mut progress = SettingsProgress::new(BotManagementResource::KIND);

    if let Err(e) = reconciler
        .reconcile(&resource, &desired, &poll, &mut progress)
        .await
    {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
