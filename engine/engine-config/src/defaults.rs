//! Default configuration values loaded from config.defaults.toml.
//!
//! The shared TOML file is embedded at compile time so the binary and the
//! checked-in defaults never drift apart.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    search: SearchDefaults,
    arena: ArenaDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    time_budget_ms: u64,
    exploration: f64,
    rave_k: f64,
    rollout_epsilon: f64,
    reward_scale: f64,
    seed: u64,
}

#[derive(Debug, Deserialize)]
struct ArenaDefaults {
    players: usize,
    games: u32,
    seed: u64,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Search
pub fn time_budget_ms() -> u64 {
    DEFAULTS.search.time_budget_ms
}
pub fn exploration() -> f64 {
    DEFAULTS.search.exploration
}
pub fn rave_k() -> f64 {
    DEFAULTS.search.rave_k
}
pub fn rollout_epsilon() -> f64 {
    DEFAULTS.search.rollout_epsilon
}
pub fn reward_scale() -> f64 {
    DEFAULTS.search.reward_scale
}
pub fn search_seed() -> u64 {
    DEFAULTS.search.seed
}

// Arena
pub fn players() -> usize {
    DEFAULTS.arena.players
}
pub fn games() -> u32 {
    DEFAULTS.arena.games
}
pub fn arena_seed() -> u64 {
    DEFAULTS.arena.seed
}
