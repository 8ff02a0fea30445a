//! Match statistics: scores, wins and search effort per seat.

use std::time::Instant;
use tracing::info;

/// Outcome of one finished game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub scores: Vec<f64>,
    /// Searches run by all search agents during the game
    pub searches: u32,
    /// Iterations completed across those searches
    pub iterations: u64,
}

impl GameRecord {
    /// Seats sharing the top score.
    pub fn winners(&self) -> Vec<usize> {
        let best = self.scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (0..self.scores.len())
            .filter(|&seat| self.scores[seat] == best)
            .collect()
    }
}

/// Running totals over a match.
#[derive(Debug)]
pub struct ArenaStats {
    games: u32,
    /// Wins per seat; a shared first place splits the win
    wins: Vec<f64>,
    total_scores: Vec<f64>,
    searches: u64,
    iterations: u64,
    start_time: Instant,
}

/// Point-in-time view of [`ArenaStats`].
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaSummary {
    pub games: u32,
    pub win_rates: Vec<f64>,
    pub mean_scores: Vec<f64>,
    pub avg_iterations_per_search: f64,
    pub runtime_seconds: f64,
}

impl ArenaStats {
    pub fn new(players: usize) -> Self {
        Self {
            games: 0,
            wins: vec![0.0; players],
            total_scores: vec![0.0; players],
            searches: 0,
            iterations: 0,
            start_time: Instant::now(),
        }
    }

    pub fn record_game(&mut self, record: &GameRecord) {
        self.games += 1;
        let winners = record.winners();
        for &seat in &winners {
            self.wins[seat] += 1.0 / winners.len() as f64;
        }
        for (total, score) in self.total_scores.iter_mut().zip(&record.scores) {
            *total += score;
        }
        self.searches += record.searches as u64;
        self.iterations += record.iterations;
    }

    pub fn snapshot(&self) -> ArenaSummary {
        let per_game = |total: &f64| {
            if self.games > 0 {
                total / self.games as f64
            } else {
                0.0
            }
        };
        let avg_iterations_per_search = if self.searches > 0 {
            self.iterations as f64 / self.searches as f64
        } else {
            0.0
        };

        ArenaSummary {
            games: self.games,
            win_rates: self.wins.iter().map(per_game).collect(),
            mean_scores: self.total_scores.iter().map(per_game).collect(),
            avg_iterations_per_search,
            runtime_seconds: self.start_time.elapsed().as_secs_f64(),
        }
    }

    pub fn log_summary(&self) {
        let summary = self.snapshot();
        for (seat, (win_rate, mean_score)) in summary
            .win_rates
            .iter()
            .zip(&summary.mean_scores)
            .enumerate()
        {
            info!(
                seat,
                win_rate = format!("{:.1}%", win_rate * 100.0),
                mean_score = format!("{:.2}", mean_score),
                "Seat summary"
            );
        }
        info!(
            games = summary.games,
            avg_iterations = format!("{:.0}", summary.avg_iterations_per_search),
            runtime_s = format!("{:.1}", summary.runtime_seconds),
            "Match complete"
        );
    }
}
