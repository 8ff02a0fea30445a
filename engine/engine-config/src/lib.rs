//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic shared by
//! the search engine and the arena binary.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`MAKI_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! MAKI_<SECTION>_<KEY>=value
//!
//! Examples:
//!     MAKI_COMMON_LOG_LEVEL=debug
//!     MAKI_SEARCH_TIME_BUDGET_MS=250
//!     MAKI_SEARCH_RAVE_K=500
//!     MAKI_ARENA_PLAYERS=3
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;
