//! Bounded, newest-first match history.

use crate::game::{Choice, Outcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Capacity of a server-side per-user history.
pub const SERVER_HISTORY_CAP: usize = 50;

/// Capacity of a storage-free client-side history.
pub const LOCAL_HISTORY_CAP: usize = 20;

/// One resolved match. Immutable once created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub played_at: DateTime<Utc>,
    pub user: Choice,
    pub opponent: Choice,
    pub outcome: Outcome,
}

impl MatchRecord {
    pub fn new(played_at: DateTime<Utc>, user: Choice, opponent: Choice, outcome: Outcome) -> Self {
        Self {
            played_at,
            user,
            opponent,
            outcome,
        }
    }
}

/// Bounded ordered history, newest first. Oldest entries drop on overflow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchHistory {
    cap: usize,
    records: Vec<MatchRecord>,
}

impl MatchHistory {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            records: Vec::new(),
        }
    }

    /// Prepend a record, dropping the oldest entry once the cap is reached.
    pub fn push(&mut self, record: MatchRecord) {
        self.records.insert(0, record);
        self.records.truncate(self.cap);
    }

    /// The `limit` most recent records, newest first.
    pub fn recent(&self, limit: usize) -> &[MatchRecord] {
        &self.records[..limit.min(self.records.len())]
    }

    /// Iterate newest first.
    pub fn iter(&self) -> impl Iterator<Item = &MatchRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Drop every record, keeping the capacity.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::resolve;

    fn record(user: Choice, opponent: Choice) -> MatchRecord {
        MatchRecord::new(Utc::now(), user, opponent, resolve(user, opponent))
    }

    #[test]
    fn test_newest_first_order() {
        let mut history = MatchHistory::new(SERVER_HISTORY_CAP);
        history.push(record(Choice::Rock, Choice::Paper));
        history.push(record(Choice::Scissors, Choice::Paper));

        assert_eq!(history.len(), 2);
        assert_eq!(history.iter().next().unwrap().user, Choice::Scissors);
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut history = MatchHistory::new(3);
        history.push(record(Choice::Rock, Choice::Rock));
        history.push(record(Choice::Paper, Choice::Paper));
        history.push(record(Choice::Scissors, Choice::Scissors));
        history.push(record(Choice::Rock, Choice::Scissors));

        assert_eq!(history.len(), 3);
        // Newest entry survives at the front, the first push is gone.
        assert_eq!(history.iter().next().unwrap().user, Choice::Rock);
        assert!(history.iter().all(|r| r.user != Choice::Rock
            || r.opponent != Choice::Rock));
    }

    #[test]
    fn test_overfill_always_leaves_exactly_cap() {
        let mut history = MatchHistory::new(LOCAL_HISTORY_CAP);
        for _ in 0..(LOCAL_HISTORY_CAP * 3) {
            history.push(record(Choice::Paper, Choice::Rock));
        }
        assert_eq!(history.len(), LOCAL_HISTORY_CAP);
    }

    #[test]
    fn test_recent_limits() {
        let mut history = MatchHistory::new(10);
        for _ in 0..5 {
            history.push(record(Choice::Rock, Choice::Scissors));
        }
        assert_eq!(history.recent(3).len(), 3);
        assert_eq!(history.recent(100).len(), 5);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut history = MatchHistory::new(7);
        history.push(record(Choice::Rock, Choice::Paper));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 7);
    }
}
