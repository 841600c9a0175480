//! Bulk-randomized simulation harness.

use super::ChoiceTally;
use crate::error::GameError;
use crate::game::{resolve, Choice, Outcome};
use rand::Rng;
use serde::Serialize;

/// Upper bound on rounds per simulation run.
pub const MAX_SIMULATED_ROUNDS: u32 = 10_000;

/// Aggregate results of one simulation run. Never persisted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationReport {
    pub rounds: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// How often the simulated user side picked each choice.
    pub choice_distribution: ChoiceTally,
    pub win_pct: f64,
    pub loss_pct: f64,
    pub draw_pct: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Run `rounds` uniformly random matches and aggregate the outcomes.
///
/// Out-of-range counts are rejected rather than clamped, so a caller
/// passing a bad bound hears about it. A seeded `rng` makes the run
/// reproducible.
pub fn simulate(rounds: u32, rng: &mut impl Rng) -> Result<SimulationReport, GameError> {
    if rounds == 0 || rounds > MAX_SIMULATED_ROUNDS {
        return Err(GameError::InvalidSimulationCount {
            requested: rounds,
            max: MAX_SIMULATED_ROUNDS,
        });
    }

    let mut wins = 0;
    let mut losses = 0;
    let mut draws = 0;
    let mut choice_distribution = ChoiceTally::default();

    for _ in 0..rounds {
        let user = Choice::random(rng);
        let opponent = Choice::random(rng);
        choice_distribution.add(user);
        match resolve(user, opponent) {
            Outcome::Win => wins += 1,
            Outcome::Lose => losses += 1,
            Outcome::Draw => draws += 1,
        }
    }

    let total = rounds as f64;
    Ok(SimulationReport {
        rounds,
        wins,
        losses,
        draws,
        choice_distribution,
        win_pct: round2(wins as f64 / total * 100.0),
        loss_pct: round2(losses as f64 / total * 100.0),
        draw_pct: round2(draws as f64 / total * 100.0),
    })
}
