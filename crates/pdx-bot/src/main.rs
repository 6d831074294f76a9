//! Paradex multi-account hedge bot - entry point.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Multi-account hedge trading bot for Paradex
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via PDX_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    pdx_telemetry::init_logging()?;

    info!("Starting pdx-bot v{}", env!("CARGO_PKG_VERSION"));

    let config = pdx_bot::BotConfig::load(args.config)?;
    info!(
        market = %config.trading_pair,
        base_url = %config.base_url,
        "Configuration loaded"
    );

    let app = pdx_bot::Application::new(config)?;
    app.run().await?;

    Ok(())
}
