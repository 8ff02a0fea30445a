//! Typed game contracts consumed by the search engine.
//!
//! A host game provides a [`GameState`] (what is true right now) and a
//! [`ForwardModel`] (which moves are legal and what they do). The search never
//! looks inside either beyond these methods.

use std::collections::hash_map::DefaultHasher;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

/// Seat index of a player, `0..num_players`.
pub type PlayerId = usize;

/// Fingerprint of a decision point as seen by one observer.
pub type InfoKey = u64;

/// Game state contract.
///
/// `Clone` is the deep, independent copy: the search clones the state once per
/// iteration and mutates the copy freely.
///
/// # Type Parameters
///
/// * `Action` - one legal move. Equality and hashing must follow the move's
///   semantic fields so the same move replayed against a different state copy
///   lands on the same edge of the search tree.
pub trait GameState: Clone + Debug {
    type Action: Clone + Eq + Hash + Debug;

    /// Whether the game is over.
    fn is_terminal(&self) -> bool;

    /// Zero-based round index.
    fn round_counter(&self) -> u32;

    /// Zero-based turn index within the game.
    fn turn_counter(&self) -> u32;

    /// Seat that must act next.
    fn current_player(&self) -> PlayerId;

    /// Raw, unnormalized score of `player` in this state.
    fn game_score(&self, player: PlayerId) -> f64;

    /// Information-state key from `observer`'s point of view.
    ///
    /// Must be a function of exactly what `observer` can see. Two states that
    /// differ only in hidden information have to produce the same key, and the
    /// key may never read anything `observer` cannot observe.
    ///
    /// The default covers round, turn and observer. Games with visible table
    /// state should override it and hash that state too.
    fn info_key(&self, observer: PlayerId) -> InfoKey {
        let mut hasher = DefaultHasher::new();
        self.round_counter().hash(&mut hasher);
        self.turn_counter().hash(&mut hasher);
        observer.hash(&mut hasher);
        hasher.finish()
    }
}

/// Rules of the game, bound to no particular state.
///
/// `Clone` yields the isolated copy the search hands to each simulation.
pub trait ForwardModel<S: GameState>: Clone {
    /// Legal actions for the player to move, in a stable order.
    fn compute_available_actions(&self, state: &S) -> Vec<S::Action>;

    /// Apply `action` to `state` in place, advancing turn and round counters
    /// as the rules dictate.
    fn next(&mut self, state: &mut S, action: &S::Action);
}
