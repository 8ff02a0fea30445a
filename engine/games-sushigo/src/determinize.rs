//! Redeal hidden cards for one observer.

use engine_core::{Determinizer, PlayerId};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

use crate::State;

/// Pools every card the observer cannot see (other hands, other pending
/// picks, the deck), shuffles the pool and deals it back into the same slots.
///
/// Slot sizes are public information and are preserved. No card memory is
/// kept, so hands the observer has already held are treated as unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnseenCardShuffle;

impl Determinizer<State> for UnseenCardShuffle {
    fn determinize(&self, observation: &State, observer: PlayerId, rng: &mut ChaCha20Rng) -> State {
        let mut sampled = observation.clone();

        let mut pool = Vec::with_capacity(sampled.deck.len());
        for player in (0..sampled.num_players).filter(|&p| p != observer) {
            pool.extend_from_slice(&sampled.hands[player]);
            pool.extend_from_slice(&sampled.pending[player]);
        }
        pool.extend_from_slice(&sampled.deck);
        pool.shuffle(rng);

        let mut cards = pool.into_iter();
        for player in (0..sampled.num_players).filter(|&p| p != observer) {
            let hand_len = sampled.hands[player].len();
            sampled.hands[player] = cards.by_ref().take(hand_len).collect();
            let pending_len = sampled.pending[player].len();
            sampled.pending[player] = cards.by_ref().take(pending_len).collect();
        }
        sampled.deck = cards.collect();
        sampled
    }
}
