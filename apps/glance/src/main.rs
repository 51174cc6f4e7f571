//! # Glance
//!
//! Terminal client for the Glance feed.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod render;
mod state;
mod telemetry;

use cli::Cli;
use config::ClientConfig;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();
    telemetry::init_telemetry(config.json_logs);

    let state = AppState::build(&config).await?;

    if let Err(err) = commands::run(&state, cli.command).await {
        render::notice(&glance_core::Notice::from(&err));
        std::process::exit(1);
    }
    Ok(())
}
