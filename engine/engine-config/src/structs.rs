//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_time_budget_ms() -> u64 {
    defaults::time_budget_ms()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_rave_k() -> f64 {
    defaults::rave_k()
}
fn d_rollout_epsilon() -> f64 {
    defaults::rollout_epsilon()
}
fn d_reward_scale() -> f64 {
    defaults::reward_scale()
}
fn d_search_seed() -> u64 {
    defaults::search_seed()
}
fn d_players() -> usize {
    defaults::players()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_arena_seed() -> u64 {
    defaults::arena_seed()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
}

/// Settings shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Per-decision search settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    #[serde(default = "d_time_budget_ms")]
    pub time_budget_ms: u64,
    /// UCB1 exploration constant
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    /// RAVE blend constant; 0 disables AMAF
    #[serde(default = "d_rave_k")]
    pub rave_k: f64,
    #[serde(default = "d_rollout_epsilon")]
    pub rollout_epsilon: f64,
    /// Game score that maps to reward 1.0
    #[serde(default = "d_reward_scale")]
    pub reward_scale: f64,
    #[serde(default = "d_search_seed")]
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: defaults::time_budget_ms(),
            exploration: defaults::exploration(),
            rave_k: defaults::rave_k(),
            rollout_epsilon: defaults::rollout_epsilon(),
            reward_scale: defaults::reward_scale(),
            seed: defaults::search_seed(),
        }
    }
}

/// Arena (match runner) settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    #[serde(default = "d_players")]
    pub players: usize,
    #[serde(default = "d_games")]
    pub games: u32,
    /// Seed for dealing and for the random opponents
    #[serde(default = "d_arena_seed")]
    pub seed: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            players: defaults::players(),
            games: defaults::games(),
            seed: defaults::arena_seed(),
        }
    }
}
