//! Player contract and a uniform-random baseline.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

use crate::typed::{GameState, PlayerId};

/// Errors a player can raise while choosing an action.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("No legal actions available")]
    NoLegalActions,

    #[error("Search failed: {0}")]
    Search(String),
}

/// Anything that can take a seat at the table.
pub trait Player<S: GameState> {
    /// Seat this player occupies.
    fn player_id(&self) -> PlayerId;

    /// Choose one of `actions` given what this player can observe.
    ///
    /// An empty `actions` slice is a precondition violation and yields
    /// [`PlayerError::NoLegalActions`].
    fn select_action(
        &mut self,
        observation: &S,
        actions: &[S::Action],
    ) -> Result<S::Action, PlayerError>;

    /// New instance with the same configuration and a reseeded RNG.
    ///
    /// Drawing the seed advances this player's RNG, so repeated copies differ.
    fn copy(&mut self) -> Self
    where
        Self: Sized;
}

/// Player that picks uniformly among the legal actions.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    id: PlayerId,
    rng: ChaCha20Rng,
}

impl RandomPlayer {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    /// Create with a specific seed for determinism (used in tests)
    pub fn with_seed(id: PlayerId, seed: u64) -> Self {
        Self {
            id,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl<S: GameState> Player<S> for RandomPlayer {
    fn player_id(&self) -> PlayerId {
        self.id
    }

    fn select_action(
        &mut self,
        _observation: &S,
        actions: &[S::Action],
    ) -> Result<S::Action, PlayerError> {
        if actions.is_empty() {
            return Err(PlayerError::NoLegalActions);
        }
        let idx = self.rng.gen_range(0..actions.len());
        Ok(actions[idx].clone())
    }

    fn copy(&mut self) -> Self {
        Self::with_seed(self.id, self.rng.next_u64())
    }
}
