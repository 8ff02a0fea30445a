//! Sushi Go! implementation for the Maki engine
//!
//! Sushi Go! is a 2-5 player drafting game. Every player holds a hand, secretly
//! picks one card, then all picks are revealed together and hands pass to the
//! left. After three rounds the highest score wins.
//!
//! # Turn Model
//!
//! The search needs a sequential game, so simultaneous picks are serialized:
//! ```text
//! seat 0 picks -> seat 1 picks -> ... -> seat n-1 picks -> reveal, pass left
//!   (pending)       (pending)              (pending)       turn_counter += 1
//! ```
//! A pending pick is hidden from every other seat until the reveal. When the
//! hands run out the round is scored, puddings are kept aside and new hands
//! are dealt from the deck.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{ForwardModel, GameState};
//! use games_sushigo::{State, SushiGo};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let mut state = State::new(3, &mut rng).unwrap();
//! let mut rules = SushiGo;
//!
//! while !state.is_terminal() {
//!     let action = rules.compute_available_actions(&state)[0];
//!     rules.next(&mut state, &action);
//! }
//! println!("final score: {}", state.game_score(0));
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use engine_core::{ForwardModel, GameState, InfoKey, PlayerId};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

mod determinize;
mod heuristic;

pub use determinize::UnseenCardShuffle;
pub use heuristic::{DraftHeuristic, HeuristicWeights};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 5;
pub const ROUNDS: u32 = 3;

/// Cumulative dumpling score for 0..=5 dumplings.
pub const DUMPLING_CURVE: [i32; 6] = [0, 1, 3, 6, 10, 15];

/// Errors raised while setting up a game.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Sushi Go! needs 2 to 5 players, got {0}")]
    PlayerCount(usize),

    #[error("Deck has {available} cards but {needed} are needed")]
    DeckExhausted { needed: usize, available: usize },
}

/// Card kinds. Maki rolls carry their icon count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Card {
    Tempura,
    Sashimi,
    Dumpling,
    Maki(u8),
    SalmonNigiri,
    SquidNigiri,
    EggNigiri,
    Wasabi,
    Pudding,
    Chopsticks,
}

impl Card {
    /// Face value of a nigiri before wasabi, `None` for other cards.
    pub fn nigiri_value(self) -> Option<u32> {
        match self {
            Card::EggNigiri => Some(1),
            Card::SalmonNigiri => Some(2),
            Card::SquidNigiri => Some(3),
            _ => None,
        }
    }
}

/// The standard 108-card deck, unshuffled.
pub fn standard_deck() -> Vec<Card> {
    let counts = [
        (Card::Tempura, 14),
        (Card::Sashimi, 14),
        (Card::Dumpling, 14),
        (Card::Maki(2), 12),
        (Card::Maki(3), 8),
        (Card::Maki(1), 6),
        (Card::SalmonNigiri, 10),
        (Card::SquidNigiri, 5),
        (Card::EggNigiri, 5),
        (Card::Pudding, 10),
        (Card::Wasabi, 6),
        (Card::Chopsticks, 4),
    ];
    counts
        .iter()
        .flat_map(|&(card, n)| std::iter::repeat(card).take(n))
        .collect()
}

/// Cards dealt to each player per round.
pub fn hand_size(num_players: usize) -> usize {
    12 - num_players
}

/// A move: take one card, or spend chopsticks to take two.
///
/// Chopsticks pairs are stored in card order so the same pair always hashes
/// the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Pick(Card),
    Chopsticks(Card, Card),
}

impl Action {
    pub fn chopsticks(a: Card, b: Card) -> Self {
        if a <= b {
            Action::Chopsticks(a, b)
        } else {
            Action::Chopsticks(b, a)
        }
    }

    pub fn cards(&self) -> Vec<Card> {
        match *self {
            Action::Pick(card) => vec![card],
            Action::Chopsticks(a, b) => vec![a, b],
        }
    }
}

/// Revealed cards of one player in the current round, as scoring counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Tableau {
    pub tempura: u32,
    pub sashimi: u32,
    pub dumplings: u32,
    pub maki_icons: u32,
    /// Wasabi not yet covered by a nigiri.
    pub open_wasabi: u32,
    /// Nigiri points, wasabi tripling included.
    pub nigiri_points: u32,
    pub puddings: u32,
    pub chopsticks: u32,
}

impl Tableau {
    /// Place `card`. A nigiri lands on an open wasabi when there is one.
    pub fn add(&mut self, card: Card) {
        match card {
            Card::Tempura => self.tempura += 1,
            Card::Sashimi => self.sashimi += 1,
            Card::Dumpling => self.dumplings += 1,
            Card::Maki(icons) => self.maki_icons += icons as u32,
            Card::Wasabi => self.open_wasabi += 1,
            Card::Pudding => self.puddings += 1,
            Card::Chopsticks => self.chopsticks += 1,
            Card::SalmonNigiri | Card::SquidNigiri | Card::EggNigiri => {
                let value = card.nigiri_value().unwrap_or(0);
                if self.open_wasabi > 0 {
                    self.open_wasabi -= 1;
                    self.nigiri_points += 3 * value;
                } else {
                    self.nigiri_points += value;
                }
            }
        }
    }

    /// Points scored at round end, maki majorities excluded.
    pub fn round_points(&self) -> i32 {
        let tempura = (self.tempura / 2) as i32 * 5;
        let sashimi = (self.sashimi / 3) as i32 * 10;
        let dumplings = DUMPLING_CURVE[(self.dumplings as usize).min(5)];
        tempura + sashimi + dumplings + self.nigiri_points as i32
    }
}

/// Maki majority awards: most icons share 6, second most share 3. No second
/// prize when first place is tied, nothing for zero icons.
pub fn maki_awards(icons: &[u32]) -> Vec<i32> {
    let mut awards = vec![0; icons.len()];
    let first = icons.iter().copied().max().unwrap_or(0);
    if first == 0 {
        return awards;
    }

    let winners: Vec<usize> = (0..icons.len()).filter(|&p| icons[p] == first).collect();
    let share = 6 / winners.len() as i32;
    for &p in &winners {
        awards[p] = share;
    }
    if winners.len() > 1 {
        return awards;
    }

    let second = icons
        .iter()
        .copied()
        .filter(|&n| n < first)
        .max()
        .unwrap_or(0);
    if second == 0 {
        return awards;
    }
    let runners: Vec<usize> = (0..icons.len()).filter(|&p| icons[p] == second).collect();
    let share = 3 / runners.len() as i32;
    for p in runners {
        awards[p] = share;
    }
    awards
}

/// End-of-game pudding awards: most share +6, fewest share -6. No penalty in
/// a two-player game and nothing at all when everyone is tied.
pub fn pudding_awards(puddings: &[u32]) -> Vec<i32> {
    let mut awards = vec![0; puddings.len()];
    let most = puddings.iter().copied().max().unwrap_or(0);
    let fewest = puddings.iter().copied().min().unwrap_or(0);
    if most == fewest {
        return awards;
    }

    let leaders: Vec<usize> = (0..puddings.len()).filter(|&p| puddings[p] == most).collect();
    for &p in &leaders {
        awards[p] += 6 / leaders.len() as i32;
    }
    if puddings.len() > 2 {
        let trailers: Vec<usize> = (0..puddings.len()).filter(|&p| puddings[p] == fewest).collect();
        for &p in &trailers {
            awards[p] -= 6 / trailers.len() as i32;
        }
    }
    awards
}

/// Sushi Go! game state
///
/// Holds everything, hidden parts included. Use [`GameState::info_key`] for
/// what one seat can observe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    num_players: usize,
    hand_size: usize,
    rounds: u32,
    round: u32,
    /// Reveals so far, over the whole game
    turn: u32,
    to_move: PlayerId,
    hands: Vec<Vec<Card>>,
    /// Picks made this turn, hidden until the reveal
    pending: Vec<Vec<Card>>,
    tableaus: Vec<Tableau>,
    /// Puddings banked in finished rounds
    puddings: Vec<u32>,
    scores: Vec<i32>,
    /// Undealt cards; hands are dealt from the end
    deck: Vec<Card>,
    finished: bool,
}

impl State {
    /// Shuffle a standard deck and deal the first round.
    pub fn new(num_players: usize, rng: &mut ChaCha20Rng) -> Result<Self, SetupError> {
        let mut deck = standard_deck();
        deck.shuffle(rng);
        Self::custom(num_players, hand_size(num_players), ROUNDS, deck)
    }

    /// Set up a game with an explicit deck order, hand size and round count.
    ///
    /// Seat 0 receives the last `hand_size` cards of `deck`, seat 1 the ones
    /// before those, and so on.
    pub fn custom(
        num_players: usize,
        hand_size: usize,
        rounds: u32,
        deck: Vec<Card>,
    ) -> Result<Self, SetupError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(SetupError::PlayerCount(num_players));
        }
        let needed = num_players * hand_size * rounds as usize;
        if deck.len() < needed {
            return Err(SetupError::DeckExhausted {
                needed,
                available: deck.len(),
            });
        }

        let mut state = Self {
            num_players,
            hand_size,
            rounds,
            round: 0,
            turn: 0,
            to_move: 0,
            hands: vec![Vec::new(); num_players],
            pending: vec![Vec::new(); num_players],
            tableaus: vec![Tableau::default(); num_players],
            puddings: vec![0; num_players],
            scores: vec![0; num_players],
            deck,
            finished: false,
        };
        state.deal();
        Ok(state)
    }

    fn deal(&mut self) {
        for hand in self.hands.iter_mut() {
            let at = self.deck.len().saturating_sub(self.hand_size);
            *hand = self.deck.split_off(at);
        }
    }

    pub fn num_players(&self) -> usize {
        self.num_players
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn hand(&self, player: PlayerId) -> &[Card] {
        &self.hands[player]
    }

    /// Picks `player` made this turn. Only `player` may look at these.
    pub fn pending(&self, player: PlayerId) -> &[Card] {
        &self.pending[player]
    }

    pub fn tableau(&self, player: PlayerId) -> &Tableau {
        &self.tableaus[player]
    }

    /// Puddings banked in finished rounds.
    pub fn puddings(&self, player: PlayerId) -> u32 {
        self.puddings[player]
    }

    pub fn score(&self, player: PlayerId) -> i32 {
        self.scores[player]
    }

    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    /// Legal moves for the player to move.
    ///
    /// One `Pick` per distinct card in hand, in card order, then every
    /// chopsticks pair when the player has chopsticks on the table.
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.finished {
            return Vec::new();
        }

        let hand = &self.hands[self.to_move];
        let mut kinds = hand.clone();
        kinds.sort();
        kinds.dedup();

        let mut actions: Vec<Action> = kinds.iter().map(|&card| Action::Pick(card)).collect();
        if self.tableaus[self.to_move].chopsticks > 0 && hand.len() >= 2 {
            for (i, &a) in kinds.iter().enumerate() {
                for &b in &kinds[i..] {
                    if a != b || hand.iter().filter(|&&c| c == a).count() >= 2 {
                        actions.push(Action::Chopsticks(a, b));
                    }
                }
            }
        }
        actions
    }

    /// Play `action` for the player to move. Cards not in hand are ignored.
    pub fn apply(&mut self, action: &Action) {
        if self.finished {
            return;
        }

        let player = self.to_move;
        for card in action.cards() {
            let hand = &mut self.hands[player];
            if let Some(pos) = hand.iter().position(|&c| c == card) {
                hand.remove(pos);
                self.pending[player].push(card);
            }
        }

        if player + 1 == self.num_players {
            self.reveal();
        } else {
            self.to_move = player + 1;
        }
    }

    fn reveal(&mut self) {
        for player in 0..self.num_players {
            let mut picked = std::mem::take(&mut self.pending[player]);
            if picked.len() > 1 {
                let tableau = &mut self.tableaus[player];
                tableau.chopsticks = tableau.chopsticks.saturating_sub(1);
                self.hands[player].push(Card::Chopsticks);
            }
            // Wasabi first so a nigiri taken alongside it lands on it.
            picked.sort_by_key(|&card| card != Card::Wasabi);
            for card in picked {
                self.tableaus[player].add(card);
            }
        }

        self.hands.rotate_right(1);
        self.turn += 1;
        self.to_move = 0;

        if self.hands.iter().all(|hand| hand.is_empty()) {
            self.end_round();
        }
    }

    fn end_round(&mut self) {
        let icons: Vec<u32> = self.tableaus.iter().map(|t| t.maki_icons).collect();
        let maki = maki_awards(&icons);

        for player in 0..self.num_players {
            let tableau = std::mem::take(&mut self.tableaus[player]);
            self.scores[player] += tableau.round_points() + maki[player];
            self.puddings[player] += tableau.puddings;
        }

        self.round += 1;
        if self.round >= self.rounds {
            for (score, award) in self.scores.iter_mut().zip(pudding_awards(&self.puddings)) {
                *score += award;
            }
            self.finished = true;
        } else {
            self.deal();
        }
    }
}

impl GameState for State {
    type Action = Action;

    fn is_terminal(&self) -> bool {
        self.finished
    }

    fn round_counter(&self) -> u32 {
        self.round
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

    /// Round, turn, seat to move, the observer's own hand and pending pick,
    /// and the public table. Other hands, other pending picks and the deck
    /// order never enter the key.
    fn info_key(&self, observer: PlayerId) -> InfoKey {
        let mut hasher = DefaultHasher::new();
        self.round.hash(&mut hasher);
        self.turn.hash(&mut hasher);
        self.to_move.hash(&mut hasher);
        observer.hash(&mut hasher);

        let mut hand = self.hands[observer].clone();
        hand.sort();
        hand.hash(&mut hasher);
        let mut pending = self.pending[observer].clone();
        pending.sort();
        pending.hash(&mut hasher);

        self.tableaus.hash(&mut hasher);
        self.puddings.hash(&mut hasher);
        self.scores.hash(&mut hasher);
        hasher.finish()
    }
}

/// Sushi Go! rules as a forward model
#[derive(Debug, Clone, Copy, Default)]
pub struct SushiGo;

impl ForwardModel<State> for SushiGo {
    fn compute_available_actions(&self, state: &State) -> Vec<Action> {
        state.legal_actions()
    }

    fn next(&mut self, state: &mut State, action: &Action) {
        state.apply(action);
    }
}

#[cfg(test)]
mod tests;
