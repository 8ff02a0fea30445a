//! Pluggable strategies the search consumes: hidden-information sampling and
//! move desirability for rollouts.

use rand_chacha::ChaCha20Rng;

use crate::typed::{GameState, PlayerId};

/// Resolves hidden information into one concrete, fully-observable state.
///
/// The sample must agree with everything `observer` can see in `observation`.
/// The search performs no validation of that agreement.
pub trait Determinizer<S: GameState> {
    fn determinize(&self, observation: &S, observer: PlayerId, rng: &mut ChaCha20Rng) -> S;
}

/// Determinizer for games without hidden information: returns a copy.
///
/// Using it on a game that does hide information means every iteration searches
/// the true state, which leaks hidden cards into the search.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerfectInformation;

impl<S: GameState> Determinizer<S> for PerfectInformation {
    fn determinize(&self, observation: &S, _observer: PlayerId, _rng: &mut ChaCha20Rng) -> S {
        observation.clone()
    }
}

/// Scores a candidate move for rollout guidance.
///
/// The score is unbounded and only compared between candidates of the same
/// state. It must be a pure function of the state reached by applying
/// `action` to a copy of `state` for `actor`.
pub trait Heuristic<S: GameState> {
    fn evaluate(&self, state: &S, actor: PlayerId, action: &S::Action) -> f64;
}

/// Heuristic that scores every move the same, which turns greedy rollout
/// steps into "first legal action".
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatHeuristic;

impl<S: GameState> Heuristic<S> for FlatHeuristic {
    fn evaluate(&self, _state: &S, _actor: PlayerId, _action: &S::Action) -> f64 {
        0.0
    }
}
