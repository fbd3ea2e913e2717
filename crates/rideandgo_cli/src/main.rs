//! RideAndGo developer CLI

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use rideandgo_app::{init_logging, AppConfig};

use cli::Cli;

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load_from_dir(&cli.config).with_context(|| {
        format!("Failed to load configuration from {}", cli.config.display())
    })?;
    if let Some(storage) = &cli.storage {
        config.storage.path = storage.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&config.logging);

    tracing::debug!(storage = %config.storage.path.display(), "starting");
    commands::run(cli.command, config).await
}
