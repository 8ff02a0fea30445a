//! Monte Carlo Tree Search with UCB1 + RAVE selection for hidden-information
//! games.
//!
//! This crate provides a game-agnostic search that works with any game
//! implementing the `engine-core` contracts.
//!
//! # Overview
//!
//! Each decision runs iterations until a wall-clock (or iteration) budget is
//! spent. Every iteration:
//!
//! 1. **Determinization**: sample a concrete state consistent with what the
//!    searching player can observe
//! 2. **Selection/Expansion**: descend the tree with UCB1 over a RAVE-blended
//!    value, adding exactly one new node
//! 3. **Rollout**: play to the end with an epsilon-greedy heuristic policy and
//!    normalize the final score to `[0, 1]`
//! 4. **Backpropagation**: update edge statistics and AMAF statistics along the
//!    path
//!
//! Nodes are keyed by information state, not by position in a tree, so every
//! determinization that looks the same to the searching player shares
//! statistics, and the table survives across decisions within a game.
//!
//! # Usage
//!
//! ```rust,ignore
//! use engine_core::ForwardModel;
//! use games_sushigo::{DraftHeuristic, State, SushiGo, UnseenCardShuffle};
//! use mcts::{MctsAgent, SearchConfig};
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let state = State::new(4, &mut rng)?;
//! let config = SearchConfig::default().with_time_budget_ms(200);
//! let mut agent = MctsAgent::new(0, config, SushiGo, UnseenCardShuffle, DraftHeuristic::default())?;
//!
//! let legal = SushiGo.compute_available_actions(&state);
//! let result = agent.search(&state, &legal)?;
//! println!("{:?} after {} iterations", result.action, result.iterations);
//! ```
//!
//! # Configuration
//!
//! The [`SearchConfig`] struct controls search behavior:
//!
//! - `budget`: time per decision (default: 1000 ms) or a fixed iteration count
//! - `exploration`: UCB1 constant `c` (default: 1.41)
//! - `rave_k`: RAVE blend constant (default: 1500)
//! - `rollout_epsilon`: random-move probability in rollouts (default: 0.15)
//! - `reward_scale`: score mapped to reward 1.0 (default: 30)

pub mod config;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_game;

// Re-export main types
pub use config::{SearchBudget, SearchConfig};
pub use node::{exploration_bonus, rave_weight, EdgeStats, NodeId, RaveNode};
pub use rollout::{normalize_reward, RolloutPolicy};
pub use search::{MctsAgent, SearchError, SearchResult};
pub use tree::{NodeTable, TableStats};
