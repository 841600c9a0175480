//! Outcome resolution for a pair of choices.

use super::Choice;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of one match from the user's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

impl Outcome {
    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Lose => "lose",
            Outcome::Draw => "draw",
        }
    }

    /// The same match seen from the opponent's side.
    pub fn invert(&self) -> Outcome {
        match self {
            Outcome::Win => Outcome::Lose,
            Outcome::Lose => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolve one match. Total over the 3x3 input space; every pairing is
/// listed so the compiler rejects any gap in the rule table.
pub fn resolve(user: Choice, opponent: Choice) -> Outcome {
    use Choice::*;

    match (user, opponent) {
        (Rock, Rock) | (Paper, Paper) | (Scissors, Scissors) => Outcome::Draw,
        (Rock, Scissors) | (Scissors, Paper) | (Paper, Rock) => Outcome::Win,
        (Rock, Paper) | (Scissors, Rock) | (Paper, Scissors) => Outcome::Lose,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_choices_draw() {
        for choice in Choice::ALL {
            assert_eq!(resolve(choice, choice), Outcome::Draw);
        }
    }

    #[test]
    fn test_antisymmetry() {
        for a in Choice::ALL {
            for b in Choice::ALL {
                let forward = resolve(a, b);
                let backward = resolve(b, a);
                assert_eq!(forward.invert(), backward);
            }
        }
    }

    #[test]
    fn test_all_nine_pairings() {
        let mut wins = 0;
        let mut losses = 0;
        let mut draws = 0;

        for a in Choice::ALL {
            for b in Choice::ALL {
                match resolve(a, b) {
                    Outcome::Win => wins += 1,
                    Outcome::Lose => losses += 1,
                    Outcome::Draw => draws += 1,
                }
            }
        }

        assert_eq!(wins, 3);
        assert_eq!(losses, 3);
        assert_eq!(draws, 3);
    }

    #[test]
    fn test_win_matches_beats_table() {
        for a in Choice::ALL {
            for b in Choice::ALL {
                assert_eq!(resolve(a, b) == Outcome::Win, a.beats(&b));
            }
        }
    }
}
