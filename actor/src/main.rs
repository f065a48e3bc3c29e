//! Actor - Splendor match runner
//!
//! A command-line process that:
//! 1. Loads settings from config.toml, env overrides and CLI flags
//! 2. Seats the configured agents (heuristic or MCTS) around one table
//! 3. Plays a series of seeded games and prints each game's summary
//! 4. Logs running win totals per seat

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

mod actor;
mod agents;
mod config;
mod stats;

use crate::actor::Actor;
use crate::config::Config;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let mut actor = Actor::new(config)?;
    match actor.run() {
        Ok(stats) => {
            stats.log_summary();
            info!(
                games = stats.games(),
                elapsed_secs = stats.elapsed().as_secs_f64(),
                "Match completed successfully"
            );
            Ok(())
        }
        Err(e) => {
            error!("Match failed: {:#}", e);
            Err(e)
        }
    }
}
