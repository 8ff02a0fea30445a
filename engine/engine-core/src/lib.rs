//! Core traits and types for the Maki game engine
//!
//! This crate provides the contracts a host game supplies to the search engine:
//! - `GameState`: copyable, scoreable state with an information-state key
//! - `ForwardModel`: legal-move generation and in-place state transition
//! - `Player`: anything that picks an action from an observation
//! - `Determinizer` / `Heuristic`: pluggable strategies consumed by the search

pub mod player;
pub mod strategy;
pub mod typed;

// Re-export main types for convenience
pub use player::{Player, PlayerError, RandomPlayer};
pub use strategy::{Determinizer, FlatHeuristic, Heuristic, PerfectInformation};
pub use typed::{ForwardModel, GameState, InfoKey, PlayerId};
