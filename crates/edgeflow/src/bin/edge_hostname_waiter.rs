//! Wait for an edge hostname to become visible in the account

use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use colored::Colorize;
use edgeflow::{CredentialArgs, WaiterProgress, connect, init_tracing, poll_config};
use edgeflow_core::EdgeHostnameResource;

#[derive(Parser, Debug)]
#[command(name = "edge-hostname-waiter", version)]
#[command(about = "Wait until an edge hostname shows up in the account", long_about = None)]
struct Cli {
    #[command(flatten)]
    credentials: CredentialArgs,

    /// Edge hostname to wait for, e.g. www.example.com.edgekey.net
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    hostname: String,

    /// Minutes to wait before giving up
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Seconds between checks
    #[arg(long, default_value_t = 20)]
    interval: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.credentials.verbose);

    let poll = poll_config(cli.interval, cli.timeout)?;
    let reconciler = connect(&cli.credentials)?;

    let resource = EdgeHostnameResource::new(cli.hostname.as_str());
    let mut progress = WaiterProgress::new(cli.hostname.as_str());
    progress.header(poll.timeout(), poll.interval());

    if let Err(e) = reconciler
        .await_membership(&resource, &poll, &mut progress)
        .await
    {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
