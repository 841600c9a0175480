//! Running win/loss/draw counters and streak tracking.

use crate::game::Outcome;
use serde::{Deserialize, Serialize};

/// Aggregate counters derived from a sequence of outcomes.
///
/// Mutated exactly once per resolved match, in order. Percentages are
/// derived on read and never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsState {
    pub total_games: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub current_streak: u32,
    pub best_streak: u32,
}

/// Win/loss/draw shares of all recorded games, in percent (one decimal).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Percentages {
    pub win_pct: f64,
    pub loss_pct: f64,
    pub draw_pct: f64,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl StatsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one resolved outcome into the counters.
    ///
    /// A win extends the current streak and may raise the best streak; a
    /// loss resets the current streak; a draw leaves streaks unchanged.
    pub fn record(&mut self, outcome: Outcome) {
        self.total_games += 1;
        match outcome {
            Outcome::Win => {
                self.wins += 1;
                self.current_streak += 1;
                if self.current_streak > self.best_streak {
                    self.best_streak = self.current_streak;
                }
            }
            Outcome::Lose => {
                self.losses += 1;
                self.current_streak = 0;
            }
            Outcome::Draw => {
                self.draws += 1;
            }
        }
    }

    /// Derived percentages. All zero while no games are recorded, so an
    /// empty state never divides by zero.
    pub fn percentages(&self) -> Percentages {
        if self.total_games == 0 {
            return Percentages::default();
        }
        let total = self.total_games as f64;
        Percentages {
            win_pct: round1(self.wins as f64 / total * 100.0),
            loss_pct: round1(self.losses as f64 / total * 100.0),
            draw_pct: round1(self.draws as f64 / total * 100.0),
        }
    }

    /// Zero every counter. The only destructive operation on stats; callers
    /// must make it explicit rather than invoking it as a side effect.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
