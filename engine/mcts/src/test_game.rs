//! Small perfect-information game for exercising the search in unit tests.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use engine_core::{ForwardModel, GameState, Heuristic, InfoKey, PlayerId};

/// Two players share a pile of steps. On each turn the player to move takes
/// 1 to 3 steps and banks them as points. The game ends when the pile is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ladder {
    pub remaining: u32,
    pub scores: [u32; 2],
    pub to_move: PlayerId,
    pub turn: u32,
}

impl Ladder {
    pub fn new(steps: u32) -> Self {
        Self {
            remaining: steps,
            scores: [0, 0],
            to_move: 0,
            turn: 0,
        }
    }

    pub fn finished(scores: [u32; 2]) -> Self {
        Self {
            remaining: 0,
            scores,
            to_move: 0,
            turn: 0,
        }
    }
}

impl GameState for Ladder {
    type Action = u32;

    fn is_terminal(&self) -> bool {
        self.remaining == 0
    }

    fn round_counter(&self) -> u32 {
        0
    }

    fn turn_counter(&self) -> u32 {
        self.turn
    }

    fn current_player(&self) -> PlayerId {
        self.to_move
    }

    fn game_score(&self, player: PlayerId) -> f64 {
        self.scores[player] as f64
    }

    fn info_key(&self, observer: PlayerId) -> InfoKey {
        let mut hasher = DefaultHasher::new();
        (self.turn, self.remaining, self.scores, self.to_move, observer).hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LadderRules;

impl ForwardModel<Ladder> for LadderRules {
    fn compute_available_actions(&self, state: &Ladder) -> Vec<u32> {
        (1..=3).filter(|&n| n <= state.remaining).collect()
    }

    fn next(&mut self, state: &mut Ladder, action: &u32) {
        state.remaining -= action;
        state.scores[state.to_move] += action;
        state.to_move = 1 - state.to_move;
        state.turn += 1;
    }
}

/// Scores a move by its size.
#[derive(Debug, Clone, Default)]
pub struct PreferLargest;

impl Heuristic<Ladder> for PreferLargest {
    fn evaluate(&self, _state: &Ladder, _actor: PlayerId, action: &u32) -> f64 {
        *action as f64
    }
}
