//! Tally API Server
//!
//! Run with: cargo run --bin tally-api
//!
//! # Configuration
//!
//! Settings come from the first config file found at
//! `<config_dir>/tally/config.toml`, `/etc/tally/config.toml` or
//! `./config.toml`, or from the path given as the first argument.
//!
//! Environment variables override the file:
//! - `TALLY_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `TALLY_API_PORT`: Port to listen on (default: 8082)
//! - `TALLY_COMMISSION_THRESHOLD`: Commission threshold (default: 50000)
//! - `TALLY_COMMISSION_RATE`: Commission rate (default: 0.1)
//! - `TALLY_SEED_DEMO_DATA`: Start with the demo employees (default: true)
//! - `TALLY_CURRENCY_SYMBOL`: Currency symbol (default: ₹)
//! - `TALLY_LOG_LEVEL`, `TALLY_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full filter override

use std::path::PathBuf;

use tally::api::{serve, AppState};
use tally::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => Config::load_with_env(&path)?,
        None => Config::load_default(),
    };

    config.logging.init();

    tracing::info!("Starting Tally API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        threshold = config.commission.threshold,
        rate = config.commission.rate,
        "Commission policy"
    );

    let roster = config.initial_roster();
    tracing::info!(employees = roster.len(), "Roster initialized");

    let api_config = config.api.clone();
    let state = AppState::with_ws_config(
        roster,
        config.api,
        config.display,
        config.websocket,
    );

    tracing::info!("Starting server on {}:{}", api_config.host, api_config.port);
    serve(state, &api_config).await?;

    tracing::info!("Tally API server stopped");
    Ok(())
}
