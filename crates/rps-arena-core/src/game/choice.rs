//! The three playable choices and their dominance relations.

use crate::error::GameError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three playable hands. The rule set is fixed; there is no
/// runtime configuration of the dominance cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    /// All choices in fixed declaration order.
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Choice::Rock => "rock",
            Choice::Paper => "paper",
            Choice::Scissors => "scissors",
        }
    }

    /// Check if this choice beats the other.
    pub fn beats(&self, other: &Choice) -> bool {
        matches!(
            (self, other),
            (Choice::Rock, Choice::Scissors)
                | (Choice::Scissors, Choice::Paper)
                | (Choice::Paper, Choice::Rock)
        )
    }

    /// The choice that beats this one.
    pub fn counter(&self) -> Choice {
        match self {
            Choice::Rock => Choice::Paper,
            Choice::Paper => Choice::Scissors,
            Choice::Scissors => Choice::Rock,
        }
    }

    /// The choice this one beats.
    pub fn prey(&self) -> Choice {
        match self {
            Choice::Rock => Choice::Scissors,
            Choice::Paper => Choice::Rock,
            Choice::Scissors => Choice::Paper,
        }
    }

    /// Draw a choice uniformly at random.
    pub fn random(rng: &mut impl Rng) -> Choice {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Choice {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rock" => Ok(Choice::Rock),
            "paper" => Ok(Choice::Paper),
            "scissors" => Ok(Choice::Scissors),
            other => Err(GameError::InvalidChoice(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_beats_cycle() {
        assert!(Choice::Rock.beats(&Choice::Scissors));
        assert!(Choice::Scissors.beats(&Choice::Paper));
        assert!(Choice::Paper.beats(&Choice::Rock));
    }

    #[test]
    fn test_no_other_beats_relations() {
        let mut beats_count = 0;
        for a in Choice::ALL {
            for b in Choice::ALL {
                if a.beats(&b) {
                    beats_count += 1;
                    assert!(!b.beats(&a));
                }
            }
            assert!(!a.beats(&a));
        }
        assert_eq!(beats_count, 3);
    }

    #[test]
    fn test_counter_inverts_beats() {
        for choice in Choice::ALL {
            assert!(choice.counter().beats(&choice));
            assert!(choice.beats(&choice.prey()));
        }
    }

    #[test]
    fn test_parse_round_trip() {
        for choice in Choice::ALL {
            assert_eq!(choice.as_str().parse::<Choice>().unwrap(), choice);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(
            "lizard".parse::<Choice>(),
            Err(GameError::InvalidChoice("lizard".to_string()))
        );
        assert!("Rock".parse::<Choice>().is_err());
        assert!("".parse::<Choice>().is_err());
    }

    #[test]
    fn test_random_covers_all_choices() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 3];
        for _ in 0..100 {
            seen[Choice::random(&mut rng) as usize] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }
}
