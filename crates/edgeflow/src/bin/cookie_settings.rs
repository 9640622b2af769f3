//! Set cookie settings on the latest config version and wait until they apply

use clap::{ArgAction, Parser};
use colored::Colorize;
use edgeflow::{CredentialArgs, SettingsProgress, connect, init_tracing, poll_config};
use edgeflow_core::{ConfigId, CookieSettings, CookieSettingsResource, SettingsResource};

#[derive(Parser, Debug)]
#[command(name = "cookie-settings", version)]
#[command(about = "Push cookie settings to the latest config version and verify them", long_about = None)]
struct Cli {
    #[command(flatten)]
    credentials: CredentialArgs,

    /// Security configuration ID
    #[arg(long)]
    config_id: ConfigId,

    /// Use secure cookies for all traffic
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    use_all_secure: bool,

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

    let poll = poll_config(cli.interval, cli.timeout)?;
    let reconciler = connect(&cli.credentials)?;

    let resource = CookieSettingsResource::new(cli.config_id);
    let desired = CookieSettings::automatic(cli.use_all_secure);
    let mut progress = SettingsProgress::new(CookieSettingsResource::KIND);

    if let Err(e) = reconciler
        .reconcile(&resource, &desired, &poll, &mut progress)
        .await
    {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
