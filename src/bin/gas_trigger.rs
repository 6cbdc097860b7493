use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gas_trigger::{Agent, AgentSettings, FileConfigSource};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Broadcast pre-signed transactions once the gas price drops to their threshold.
#[derive(Debug, Parser)]
#[command(name = "gas-trigger", version)]
struct Cli {
    /// JSON config file, re-read every cycle
    config: PathBuf,

    /// Seconds between broadcast evaluation cycles
    #[arg(long, env = "GAS_TRIGGER_POLL_SECS", default_value_t = 60)]
    poll_secs: u64,

    /// Seconds between gas price refreshes
    #[arg(long, env = "GAS_TRIGGER_PRICE_SECS", default_value_t = 60)]
    price_secs: u64,

    #[arg(long, default_value_t = 20)]
    price_timeout_secs: u64,

    #[arg(long, default_value_t = 30)]
    rpc_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gas_trigger=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let settings = AgentSettings::from_secs(
        cli.poll_secs,
        cli.price_secs,
        cli.price_timeout_secs,
        cli.rpc_timeout_secs,
    );

    let agent = Agent::start(FileConfigSource::new(&cli.config), settings)
        .await
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;

    let shutdown = CancellationToken::new();
    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutting down");
            on_signal.cancel();
        }
    });

    agent.run(shutdown).await;
    Ok(())
}
