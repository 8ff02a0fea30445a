//! Search configuration parameters.

use std::time::{Duration, Instant};

use crate::search::SearchError;

/// How long one decision is allowed to search.
///
/// The budget is checked between iterations only, so a time budget can be
/// overshot by up to one simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBudget {
    /// Wall-clock budget per decision.
    Time(Duration),
    /// Fixed number of iterations per decision, for reproducible runs.
    Iterations(u32),
}

impl SearchBudget {
    /// Whether another iteration may start.
    #[inline]
    pub fn is_exhausted(&self, started: Instant, iterations: u32) -> bool {
        match *self {
            SearchBudget::Time(budget) => started.elapsed() >= budget,
            SearchBudget::Iterations(limit) => iterations >= limit,
        }
    }
}

/// Configuration for UCB1 + RAVE search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Per-decision search budget.
    pub budget: SearchBudget,

    /// Exploration constant `c` of the UCB1 bonus.
    pub exploration: f64,

    /// RAVE blend constant `k`. The AMAF weight at a node with `n` visits is
    /// `k / (k + max(1, n))`, so larger `k` trusts AMAF for longer.
    pub rave_k: f64,

    /// Probability that a rollout step ignores the heuristic and picks
    /// uniformly at random.
    pub rollout_epsilon: f64,

    /// Raw score treated as a "typical maximum"; rewards are
    /// `clamp(score / reward_scale, 0, 1)`.
    pub reward_scale: f64,

    /// Seed for the search RNG.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            budget: SearchBudget::Time(Duration::from_millis(1000)),
            exploration: 1.41,
            rave_k: 1500.0,
            rollout_epsilon: 0.15,
            reward_scale: 30.0,
            seed: 7,
        }
    }
}

impl SearchConfig {
    /// Create a fast, reproducible config for testing.
    pub fn for_testing() -> Self {
        Self {
            budget: SearchBudget::Iterations(200),
            seed: 42,
            ..Self::default()
        }
    }

    /// Builder pattern: set a wall-clock budget in milliseconds.
    pub fn with_time_budget_ms(mut self, ms: u64) -> Self {
        self.budget = SearchBudget::Time(Duration::from_millis(ms));
        self
    }

    /// Builder pattern: set a fixed iteration count.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.budget = SearchBudget::Iterations(n);
        self
    }

    /// Builder pattern: set the UCB exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set the RAVE blend constant.
    pub fn with_rave_k(mut self, k: f64) -> Self {
        self.rave_k = k;
        self
    }

    /// Builder pattern: set the rollout exploration probability.
    pub fn with_rollout_epsilon(mut self, epsilon: f64) -> Self {
        self.rollout_epsilon = epsilon;
        self
    }

    /// Builder pattern: set the reward scale.
    pub fn with_reward_scale(mut self, scale: f64) -> Self {
        self.reward_scale = scale;
        self
    }

    /// Builder pattern: set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject parameter values the search cannot use.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration must be finite and >= 0, got {}",
                self.exploration
            )));
        }
        if !self.rave_k.is_finite() || self.rave_k < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "rave_k must be finite and >= 0, got {}",
                self.rave_k
            )));
        }
        if !(0.0..=1.0).contains(&self.rollout_epsilon) {
            return Err(SearchError::InvalidConfig(format!(
                "rollout_epsilon must be in [0, 1], got {}",
                self.rollout_epsilon
            )));
        }
        if !self.reward_scale.is_finite() || self.reward_scale <= 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "reward_scale must be finite and > 0, got {}",
                self.reward_scale
            )));
        }
        Ok(())
    }
}
