//! Data models for the arena service.

use chrono::{DateTime, Utc};
use rps_arena_core::{
    Choice, MatchHistory, Outcome, ProfileSnapshot, StatsState, SERVER_HISTORY_CAP,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// Registered player
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String) -> Self {
        Self {
            id: UserId::new(),
            username,
            created_at: Utc::now(),
        }
    }
}

/// Per-user game data. All mutation flows through the core operations
/// (record, push, reset); presentation reads never touch it directly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub stats: StatsState,
    pub history: MatchHistory,
}

impl PlayerProfile {
    pub fn new() -> Self {
        Self {
            stats: StatsState::new(),
            history: MatchHistory::new(SERVER_HISTORY_CAP),
        }
    }

    pub fn snapshot(&self) -> ProfileSnapshot {
        ProfileSnapshot {
            stats: self.stats,
            history: self.history.clone(),
        }
    }

    pub fn from_snapshot(snapshot: ProfileSnapshot) -> Self {
        Self {
            stats: snapshot.stats,
            history: snapshot.history,
        }
    }
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self::new()
    }
}

/// One resolved round, as returned to the caller.
#[derive(Clone, Debug, Serialize)]
pub struct PlayedMatch {
    pub user_choice: Choice,
    pub opponent_choice: Choice,
    pub outcome: Outcome,
    pub message: String,
    pub stats: StatsState,
}

/// Human-readable result line for one round.
pub fn result_message(user: Choice, opponent: Choice, outcome: Outcome) -> String {
    match outcome {
        Outcome::Win => format!("You win: {} beats {}", user, opponent),
        Outcome::Lose => format!("You lose: {} beats {}", opponent, user),
        Outcome::Draw => format!("Draw: both played {}", user),
    }
}

/// One leaderboard row.
#[derive(Clone, Debug, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub username: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub total_games: u32,
    pub best_streak: u32,
    pub win_pct: f64,
}

/// Arena-wide statistics.
#[derive(Clone, Debug, Serialize)]
pub struct GlobalStats {
    pub total_matches: u64,
    pub total_users: usize,
    pub matches_today: u64,
    pub top_player: Option<TopPlayer>,
}

/// The player with the most wins.
#[derive(Clone, Debug, Serialize)]
pub struct TopPlayer {
    pub username: String,
    pub wins: u32,
}

/// Entry in the cross-user recent matches feed.
#[derive(Clone, Debug, Serialize)]
pub struct RecentMatch {
    pub username: String,
    pub user_choice: Choice,
    pub opponent_choice: Choice,
    pub outcome: Outcome,
    pub played_at: DateTime<Utc>,
}
