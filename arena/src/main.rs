//! Arena - Sushi Go! match runner for the Maki search engine
//!
//! Plays a series of games with a UCB1 + RAVE search agent against random
//! players (or against itself with `--all-search`) and logs per-game scores
//! and overall win rates.

use anyhow::Result;
use clap::Parser;
use tracing::info;

mod arena;
mod config;
mod stats;

use crate::arena::Arena;
use crate::config::Config;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");
    info!(
        time_budget_ms = config.time_budget_ms,
        exploration = config.exploration,
        rave_k = config.rave_k,
        rollout_epsilon = config.rollout_epsilon,
        "Search settings"
    );

    let mut arena = Arena::new(config)?;
    arena.run()?;
    arena.stats().log_summary();
    Ok(())
}
