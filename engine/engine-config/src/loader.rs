//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from a crate directory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by the MAKI_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    if let Ok(path) = std::env::var("MAKI_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from MAKI_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!("MAKI_CONFIG={} not found, searching defaults", path.display());
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
///
/// Unreadable or malformed files fall back to the defaults with a warning.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u64, f64, etc.); unparseable values are ignored
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = v,
            Ok(Err(_)) => warn!("Ignoring unparseable {}", $key),
            Err(_) => {}
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: MAKI_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "MAKI_COMMON_LOG_LEVEL");

    // Search
    env_override!(
        config,
        search.time_budget_ms,
        "MAKI_SEARCH_TIME_BUDGET_MS",
        parse
    );
    env_override!(config, search.exploration, "MAKI_SEARCH_EXPLORATION", parse);
    env_override!(config, search.rave_k, "MAKI_SEARCH_RAVE_K", parse);
    env_override!(
        config,
        search.rollout_epsilon,
        "MAKI_SEARCH_ROLLOUT_EPSILON",
        parse
    );
    env_override!(
        config,
        search.reward_scale,
        "MAKI_SEARCH_REWARD_SCALE",
        parse
    );
    env_override!(config, search.seed, "MAKI_SEARCH_SEED", parse);

    // Arena
    env_override!(config, arena.players, "MAKI_ARENA_PLAYERS", parse);
    env_override!(config, arena.games, "MAKI_ARENA_GAMES", parse);
    env_override!(config, arena.seed, "MAKI_ARENA_SEED", parse);

    config
}
