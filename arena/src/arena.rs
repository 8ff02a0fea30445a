//! Match runner: deals games and asks each seat for its moves.

use anyhow::{anyhow, Result};
use engine_core::{ForwardModel, GameState, Player, RandomPlayer};
use games_sushigo::{Action, DraftHeuristic, State, SushiGo, UnseenCardShuffle};
use mcts::MctsAgent;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};

use crate::config::Config;
use crate::stats::{ArenaStats, GameRecord};

pub type SushiAgent = MctsAgent<State, SushiGo, UnseenCardShuffle, DraftHeuristic>;

/// Who sits in a seat.
pub enum Seat {
    Search(Box<SushiAgent>),
    Random(RandomPlayer),
}

impl Seat {
    fn label(&self) -> &'static str {
        match self {
            Seat::Search(_) => "search",
            Seat::Random(_) => "random",
        }
    }

    /// Pick a move; also returns search iterations when the seat searched.
    fn choose(&mut self, state: &State, legal: &[Action]) -> Result<(Action, Option<u32>)> {
        match self {
            Seat::Search(agent) => {
                let result = agent.search(state, legal)?;
                Ok((result.action, Some(result.iterations)))
            }
            Seat::Random(player) => Ok((player.select_action(state, legal)?, None)),
        }
    }

    /// Drop everything learned in the previous game.
    fn reset(&mut self) {
        if let Seat::Search(agent) = self {
            agent.clear_table();
        }
    }
}

pub struct Arena {
    config: Config,
    seats: Vec<Seat>,
    rng: ChaCha20Rng,
    stats: ArenaStats,
}

impl Arena {
    pub fn new(config: Config) -> Result<Self> {
        let mut seats = Vec::with_capacity(config.players);
        for seat in 0..config.players {
            if seat == 0 || config.all_search {
                let agent = MctsAgent::new(
                    seat,
                    config.search_config(seat),
                    SushiGo,
                    UnseenCardShuffle,
                    DraftHeuristic::default(),
                )?;
                seats.push(Seat::Search(Box::new(agent)));
            } else {
                let seed = config.seed.wrapping_add(seat as u64);
                seats.push(Seat::Random(RandomPlayer::with_seed(seat, seed)));
            }
        }

        Ok(Self {
            rng: ChaCha20Rng::seed_from_u64(config.seed),
            stats: ArenaStats::new(config.players),
            config,
            seats,
        })
    }

    pub fn stats(&self) -> &ArenaStats {
        &self.stats
    }

    /// Play every configured game.
    pub fn run(&mut self) -> Result<()> {
        let labels: Vec<&str> = self.seats.iter().map(Seat::label).collect();
        info!(
            games = self.config.games,
            players = self.config.players,
            seats = ?labels,
            "Starting match"
        );

        for game in 1..=self.config.games {
            let record = self.play_game()?;
            info!(
                game,
                scores = ?record.scores,
                winners = ?record.winners(),
                searches = record.searches,
                "Game finished"
            );
            self.stats.record_game(&record);
        }
        Ok(())
    }

    /// Play one game from a fresh deal.
    pub fn play_game(&mut self) -> Result<GameRecord> {
        for seat in self.seats.iter_mut() {
            seat.reset();
        }

        let mut state = State::new(self.config.players, &mut self.rng)?;
        let mut rules = SushiGo;
        let mut searches = 0u32;
        let mut iterations = 0u64;

        while !state.is_terminal() {
            let legal = rules.compute_available_actions(&state);
            let seat = state.current_player();
            let (action, searched) = self.seats[seat].choose(&state, &legal)?;
            if !legal.contains(&action) {
                return Err(anyhow!("seat {} chose illegal {:?}", seat, action));
            }
            if let Some(n) = searched {
                searches += 1;
                iterations += n as u64;
            }
            debug!(seat, round = state.round_counter(), turn = state.turn_counter(), ?action, "Move");
            rules.next(&mut state, &action);
        }

        Ok(GameRecord {
            scores: (0..self.config.players).map(|p| state.game_score(p)).collect(),
            searches,
            iterations,
        })
    }
}
