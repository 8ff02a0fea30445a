//! Configuration for the arena binary
//!
//! Defaults come from config.toml (with `MAKI_*` environment overrides);
//! CLI arguments take highest priority.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use games_sushigo::{MAX_PLAYERS, MIN_PLAYERS};
use mcts::SearchConfig;
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

fn default_games() -> u32 {
    CENTRAL_CONFIG.arena.games
}

fn default_players() -> usize {
    CENTRAL_CONFIG.arena.players
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.arena.seed
}

fn default_time_budget_ms() -> u64 {
    CENTRAL_CONFIG.search.time_budget_ms
}

fn default_exploration() -> f64 {
    CENTRAL_CONFIG.search.exploration
}

fn default_rave_k() -> f64 {
    CENTRAL_CONFIG.search.rave_k
}

fn default_rollout_epsilon() -> f64 {
    CENTRAL_CONFIG.search.rollout_epsilon
}

fn default_reward_scale() -> f64 {
    CENTRAL_CONFIG.search.reward_scale
}

fn default_search_seed() -> u64 {
    CENTRAL_CONFIG.search.seed
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

#[derive(Parser, Debug, Clone)]
#[command(name = "arena")]
#[command(about = "Maki arena - Sushi Go! matches for the RAVE search agent")]
#[command(
    long_about = "Plays Sushi Go! games with a search agent in seat 0 and random players
in the other seats, then reports scores and win rates.

Configuration is loaded from config.toml with MAKI_* environment overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Number of games to play
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Players per game (2-5)
    #[arg(long, default_value_t = default_players())]
    pub players: usize,

    /// Seed for dealing and for the random players
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Thinking time per decision in milliseconds
    #[arg(long, default_value_t = default_time_budget_ms())]
    pub time_budget_ms: u64,

    /// UCB1 exploration constant
    #[arg(long, default_value_t = default_exploration())]
    pub exploration: f64,

    /// RAVE blend constant (0 disables AMAF)
    #[arg(long, default_value_t = default_rave_k())]
    pub rave_k: f64,

    /// Probability of a random move during rollouts
    #[arg(long, default_value_t = default_rollout_epsilon())]
    pub rollout_epsilon: f64,

    /// Score that maps to a reward of 1.0
    #[arg(long, default_value_t = default_reward_scale())]
    pub reward_scale: f64,

    /// Base seed for the search agents (offset by seat)
    #[arg(long, default_value_t = default_search_seed())]
    pub search_seed: u64,

    /// Put a search agent in every seat instead of only seat 0
    #[arg(long)]
    pub all_search: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players) {
            return Err(anyhow!(
                "players must be between {} and {}, got {}",
                MIN_PLAYERS,
                MAX_PLAYERS,
                self.players
            ));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        self.search_config(0).validate()?;
        Ok(())
    }

    /// Search settings for the agent in `seat`.
    pub fn search_config(&self, seat: usize) -> SearchConfig {
        SearchConfig::default()
            .with_time_budget_ms(self.time_budget_ms)
            .with_exploration(self.exploration)
            .with_rave_k(self.rave_k)
            .with_rollout_epsilon(self.rollout_epsilon)
            .with_reward_scale(self.reward_scale)
            .with_seed(self.search_seed.wrapping_add(seat as u64))
    }
}
