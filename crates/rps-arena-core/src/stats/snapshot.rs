//! Lossless persistence shape for one player's data.

use super::{MatchHistory, StatsState};
use serde::{Deserialize, Serialize};

/// Everything the persistence collaborator stores for one player.
///
/// Holds only source-of-truth fields. Percentages and analysis are derived
/// on read and never round-trip through storage, so a stale export can
/// never smuggle them back in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub stats: StatsState,
    pub history: MatchHistory,
}

impl ProfileSnapshot {
    pub fn new(history_cap: usize) -> Self {
        Self {
            stats: StatsState::new(),
            history: MatchHistory::new(history_cap),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{resolve, Choice};
    use crate::stats::{MatchRecord, SERVER_HISTORY_CAP};
    use chrono::Utc;

    #[test]
    fn test_round_trip_is_identity() {
        let mut snapshot = ProfileSnapshot::new(SERVER_HISTORY_CAP);
        for (user, opponent) in [
            (Choice::Rock, Choice::Scissors),
            (Choice::Paper, Choice::Scissors),
            (Choice::Scissors, Choice::Scissors),
        ] {
            let outcome = resolve(user, opponent);
            snapshot.stats.record(outcome);
            snapshot
                .history
                .push(MatchRecord::new(Utc::now(), user, opponent, outcome));
        }

        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: ProfileSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);
        assert_eq!(restored.history.capacity(), SERVER_HISTORY_CAP);
    }

    #[test]
    fn test_fresh_snapshot_round_trips() {
        let snapshot = ProfileSnapshot::new(SERVER_HISTORY_CAP);
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: ProfileSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);
        // Derived values are recomputed, not stored.
        assert!(!json.contains("pct"));
    }
}
