//! Hand-tuned draft heuristic used to steer rollouts.

use engine_core::{Heuristic, PlayerId};

use crate::{Action, State, DUMPLING_CURVE};

/// Weights of the [`DraftHeuristic`] terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicWeights {
    pub tempura_pair: f64,
    /// Bonus for an unpaired tempura that can still be completed.
    pub tempura_half: f64,
    pub sashimi_set: f64,
    /// Bonus for a partial sashimi set that can still be completed.
    pub sashimi_partial: f64,
    pub nigiri: f64,
    pub open_wasabi: f64,
    pub maki_icon: f64,
    pub maki_lead: f64,
    pub pudding: f64,
    /// Extra weight per pudding when at most one round remains.
    pub pudding_endgame: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            tempura_pair: 5.0,
            tempura_half: 1.5,
            sashimi_set: 10.0,
            sashimi_partial: 3.5,
            nigiri: 1.0,
            open_wasabi: 2.0,
            maki_icon: 0.5,
            maki_lead: 1.5,
            pudding: 0.6,
            pudding_endgame: 0.8,
        }
    }
}

/// Scores a pick by the collection the actor would hold right after it.
///
/// Only the actor's own cards, the revealed tableaus and the round and turn
/// counters are read, so the value never depends on hidden cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct DraftHeuristic {
    pub weights: HeuristicWeights,
}

impl DraftHeuristic {
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }
}

impl Heuristic<State> for DraftHeuristic {
    fn evaluate(&self, state: &State, actor: PlayerId, action: &Action) -> f64 {
        let w = &self.weights;
        let cards = action.cards();

        let mut after = state.tableau(actor).clone();
        for &card in state.pending(actor).iter().chain(cards.iter()) {
            after.add(card);
        }
        let turns_left = state.hand(actor).len().saturating_sub(cards.len()) as u32;
        let rounds_left = state.rounds().saturating_sub(state.round);

        let mut value = 0.0;

        value += (after.tempura / 2) as f64 * w.tempura_pair;
        if after.tempura % 2 == 1 && turns_left > 0 {
            value += w.tempura_half;
        }

        value += (after.sashimi / 3) as f64 * w.sashimi_set;
        let partial = after.sashimi % 3;
        if partial > 0 && turns_left >= 3 - partial {
            value += w.sashimi_partial;
        }

        value += DUMPLING_CURVE[(after.dumplings as usize).min(5)] as f64;
        value += after.nigiri_points as f64 * w.nigiri;
        if after.open_wasabi > 0 {
            value += w.open_wasabi;
        }

        value += after.maki_icons as f64 * w.maki_icon;
        let rival_icons = (0..state.num_players())
            .filter(|&p| p != actor)
            .map(|p| state.tableau(p).maki_icons)
            .max()
            .unwrap_or(0);
        if after.maki_icons > 0 && after.maki_icons > rival_icons {
            value += w.maki_lead;
        }

        let puddings = (state.puddings(actor) + after.puddings) as f64;
        value += puddings * w.pudding;
        if rounds_left <= 1 {
            value += puddings * w.pudding_endgame;
        }

        value
    }
}
