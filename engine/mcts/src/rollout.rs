//! Epsilon-greedy rollout policy.
//!
//! Rollouts play a state out to the end without touching the tree. Each step
//! either explores uniformly (probability `epsilon`) or follows the
//! heuristic's favourite move for the player to act.

use engine_core::{ForwardModel, GameState, Heuristic, PlayerId};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

use crate::config::SearchConfig;

/// Map a raw score into `[0, 1]` as `clamp(raw / scale, 0, 1)`.
#[inline]
pub fn normalize_reward(raw: f64, scale: f64) -> f64 {
    let reward = (raw / scale).clamp(0.0, 1.0);
    if reward.is_nan() {
        0.0
    } else {
        reward
    }
}

/// Rollout parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RolloutPolicy {
    pub epsilon: f64,
    pub reward_scale: f64,
}

impl RolloutPolicy {
    pub fn new(epsilon: f64, reward_scale: f64) -> Self {
        Self {
            epsilon,
            reward_scale,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.rollout_epsilon, config.reward_scale)
    }

    /// Play `state` forward until it is terminal or no action is legal, then
    /// return `perspective`'s normalized score.
    ///
    /// A state that is already terminal consumes no random draws.
    pub fn rollout<S, F, H>(
        &self,
        state: &mut S,
        model: &mut F,
        heuristic: &H,
        perspective: PlayerId,
        rng: &mut ChaCha20Rng,
    ) -> f64
    where
        S: GameState,
        F: ForwardModel<S>,
        H: Heuristic<S>,
    {
        while !state.is_terminal() {
            let legal = model.compute_available_actions(state);
            if legal.is_empty() {
                break;
            }
            let action = self.choose(state, &legal, heuristic, rng);
            model.next(state, &action);
        }
        normalize_reward(state.game_score(perspective), self.reward_scale)
    }

    /// Pick one of `legal` (non-empty) for the player to move.
    ///
    /// Draws one `f64` for the epsilon test, plus one index when exploring.
    pub fn choose<S, H>(
        &self,
        state: &S,
        legal: &[S::Action],
        heuristic: &H,
        rng: &mut ChaCha20Rng,
    ) -> S::Action
    where
        S: GameState,
        H: Heuristic<S>,
    {
        if rng.gen::<f64>() < self.epsilon {
            return legal[rng.gen_range(0..legal.len())].clone();
        }

        let actor = state.current_player();
        let mut best = &legal[0];
        let mut best_score = f64::NEG_INFINITY;
        for action in legal {
            let score = heuristic.evaluate(state, actor, action);
            if score > best_score {
                best_score = score;
                best = action;
            }
        }
        best.clone()
    }
}

impl Default for RolloutPolicy {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}
