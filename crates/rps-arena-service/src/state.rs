//! Application state management.

use crate::models::*;
use crate::storage::{JsonStore, StoreSnapshot};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rps_arena_core::{
    analyze, resolve, simulate, suggest, summarize, Analysis, Choice, GameError, MatchRecord,
    PerformanceSummary, ProfileSnapshot, SimulationReport, StatsState, Suggestion,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Maximum rows a leaderboard query may return.
const LEADERBOARD_MAX: usize = 20;

/// Maximum rows the recent matches feed may return.
const RECENT_MAX: usize = 20;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Mutex<AppStateInner>>,
    /// Optional JSON store; when absent the arena is memory-only
    store: Option<Arc<JsonStore>>,
}

struct AppStateInner {
    users: HashMap<UserId, User>,
    profiles: HashMap<UserId, PlayerProfile>,
    /// Opponent-draw RNG; seeded in tests for reproducible rounds
    rng: StdRng,
    /// Simulated current time (for date-boundary testing)
    current_time: Option<DateTime<Utc>>,
}

impl AppState {
    fn build(store: Option<Arc<JsonStore>>, rng: StdRng) -> Self {
        Self {
            inner: Arc::new(Mutex::new(AppStateInner {
                users: HashMap::new(),
                profiles: HashMap::new(),
                rng,
                current_time: None,
            })),
            store,
        }
    }

    /// Create new memory-only state.
    pub fn new() -> Self {
        Self::build(None, StdRng::from_entropy())
    }

    /// Create new state backed by a JSON store.
    pub fn with_store(store: JsonStore) -> Self {
        Self::build(Some(Arc::new(store)), StdRng::from_entropy())
    }

    /// Deterministic state for tests.
    pub fn with_rng_seed(seed: u64) -> Self {
        Self::build(None, StdRng::seed_from_u64(seed))
    }

    /// Get current time (real or simulated).
    pub fn now(&self) -> DateTime<Utc> {
        self.inner
            .lock()
            .unwrap()
            .current_time
            .unwrap_or_else(Utc::now)
    }

    /// Advance simulated time by seconds.
    pub fn advance_time(&self, seconds: i64) {
        let mut inner = self.inner.lock().unwrap();
        let current = inner.current_time.unwrap_or_else(Utc::now);
        inner.current_time = Some(current + chrono::Duration::seconds(seconds));
    }

    /// Load previously saved users and profiles from the store, if any.
    pub fn restore(&self) {
        let Some(store) = &self.store else { return };
        match store.load() {
            Ok(Some(snapshot)) => {
                let user_count = snapshot.users.len();
                let mut inner = self.inner.lock().unwrap();
                inner.users = snapshot.users.into_iter().map(|u| (u.id, u)).collect();
                inner.profiles = snapshot
                    .profiles
                    .into_iter()
                    .map(|(id, p)| (id, PlayerProfile::from_snapshot(p)))
                    .collect();
                tracing::info!("Restored {} users from store", user_count);
            }
            Ok(None) => tracing::info!("No existing store snapshot"),
            Err(e) => tracing::warn!("Failed to load store snapshot: {}", e),
        }
    }

    /// Persist current users and profiles. Store errors are logged, never
    /// surfaced to the request that triggered the write.
    fn persist(&self, inner: &AppStateInner) {
        let Some(store) = &self.store else { return };
        let snapshot = StoreSnapshot {
            users: inner.users.values().cloned().collect(),
            profiles: inner
                .profiles
                .iter()
                .map(|(id, p)| (*id, p.snapshot()))
                .collect(),
        };
        if let Err(e) = store.save(&snapshot) {
            tracing::warn!("Failed to save store snapshot: {}", e);
        }
    }

    // User operations

    pub fn register_user(&self, username: String) -> User {
        let user = User::new(username);
        let mut inner = self.inner.lock().unwrap();
        inner.users.insert(user.id, user.clone());
        inner.profiles.insert(user.id, PlayerProfile::new());
        self.persist(&inner);
        user
    }

    pub fn get_user(&self, id: UserId) -> Option<User> {
        self.inner.lock().unwrap().users.get(&id).cloned()
    }

    pub fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.inner
            .lock()
            .unwrap()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    pub fn list_users(&self) -> Vec<User> {
        let mut users: Vec<User> = self.inner.lock().unwrap().users.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        users
    }

    // Game operations

    /// Resolve one round against a machine opponent and fold it into the
    /// caller's profile. None when the user does not exist.
    pub fn play(&self, user_id: UserId, choice: Choice) -> Option<PlayedMatch> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.users.contains_key(&user_id) {
            return None;
        }

        let opponent = Choice::random(&mut inner.rng);
        let outcome = resolve(choice, opponent);
        let played_at = inner.current_time.unwrap_or_else(Utc::now);

        let profile = inner.profiles.entry(user_id).or_default();
        profile.stats.record(outcome);
        profile
            .history
            .push(MatchRecord::new(played_at, choice, opponent, outcome));

        let played = PlayedMatch {
            user_choice: choice,
            opponent_choice: opponent,
            outcome,
            message: result_message(choice, opponent, outcome),
            stats: profile.stats,
        };
        self.persist(&inner);
        Some(played)
    }

    pub fn stats_for(&self, user_id: UserId) -> Option<StatsState> {
        self.inner
            .lock()
            .unwrap()
            .profiles
            .get(&user_id)
            .map(|p| p.stats)
    }

    /// The user's most recent matches, newest first. Limit defaults to the
    /// full retained history.
    pub fn history_for(&self, user_id: UserId, limit: Option<usize>) -> Option<Vec<MatchRecord>> {
        let inner = self.inner.lock().unwrap();
        let profile = inner.profiles.get(&user_id)?;
        let limit = limit.unwrap_or(profile.history.capacity());
        Some(profile.history.recent(limit).to_vec())
    }

    pub fn analysis_for(&self, user_id: UserId) -> Option<Analysis> {
        let inner = self.inner.lock().unwrap();
        let now = inner.current_time.unwrap_or_else(Utc::now);
        let profile = inner.profiles.get(&user_id)?;
        Some(analyze(&profile.history, now))
    }

    pub fn suggestion_for(&self, user_id: UserId) -> Option<Suggestion> {
        let inner = self.inner.lock().unwrap();
        let profile = inner.profiles.get(&user_id)?;
        Some(suggest(&profile.history))
    }

    pub fn summary_for(&self, user_id: UserId) -> Option<PerformanceSummary> {
        let inner = self.inner.lock().unwrap();
        let now = inner.current_time.unwrap_or_else(Utc::now);
        let profile = inner.profiles.get(&user_id)?;
        let analysis = analyze(&profile.history, now);
        Some(summarize(&profile.stats, &analysis))
    }

    /// Lossless export of the caller's stats and history.
    pub fn export_for(&self, user_id: UserId) -> Option<ProfileSnapshot> {
        self.inner
            .lock()
            .unwrap()
            .profiles
            .get(&user_id)
            .map(|p| p.snapshot())
    }

    /// Run a bulk simulation. A provided seed makes the run reproducible;
    /// otherwise the draw is fresh entropy. Gameplay RNG is untouched.
    pub fn simulate_rounds(
        &self,
        rounds: u32,
        seed: Option<u64>,
    ) -> Result<SimulationReport, GameError> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        simulate(rounds, &mut rng)
    }

    /// Clear a user's stats and history in one step. Destructive; handlers
    /// gate this behind an explicit confirmation flag.
    pub fn reset_profile(&self, user_id: UserId) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if !inner.users.contains_key(&user_id) {
            return false;
        }
        inner.profiles.insert(user_id, PlayerProfile::new());
        self.persist(&inner);
        true
    }

    // Arena-wide operations

    /// Ranked players with at least one game: wins desc, then win
    /// percentage desc, then username for a stable order.
    pub fn leaderboard(&self, limit: usize) -> Vec<LeaderboardEntry> {
        let limit = limit.clamp(1, LEADERBOARD_MAX);
        let inner = self.inner.lock().unwrap();

        let mut rows: Vec<(String, StatsState)> = inner
            .users
            .values()
            .filter_map(|user| {
                let stats = inner.profiles.get(&user.id).map(|p| p.stats)?;
                (stats.total_games > 0).then(|| (user.username.clone(), stats))
            })
            .collect();

        rows.sort_by(|(name_a, a), (name_b, b)| {
            b.wins
                .cmp(&a.wins)
                .then_with(|| {
                    b.percentages()
                        .win_pct
                        .partial_cmp(&a.percentages().win_pct)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| name_a.cmp(name_b))
        });

        rows.into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, (username, stats))| LeaderboardEntry {
                rank: i + 1,
                username,
                wins: stats.wins,
                losses: stats.losses,
                draws: stats.draws,
                total_games: stats.total_games,
                best_streak: stats.best_streak,
                win_pct: stats.percentages().win_pct,
            })
            .collect()
    }

    pub fn global_stats(&self) -> GlobalStats {
        let inner = self.inner.lock().unwrap();
        let today = inner.current_time.unwrap_or_else(Utc::now).date_naive();

        let total_matches = inner
            .profiles
            .values()
            .map(|p| p.stats.total_games as u64)
            .sum();
        // Counts retained history records, so bounded by the per-user cap.
        let matches_today = inner
            .profiles
            .values()
            .flat_map(|p| p.history.iter())
            .filter(|r| r.played_at.date_naive() == today)
            .count() as u64;
        let top_player = inner
            .users
            .values()
            .filter_map(|u| inner.profiles.get(&u.id).map(|p| (u, p.stats.wins)))
            .filter(|(_, wins)| *wins > 0)
            .max_by(|(ua, wa), (ub, wb)| wa.cmp(wb).then_with(|| ub.username.cmp(&ua.username)))
            .map(|(u, wins)| TopPlayer {
                username: u.username.clone(),
                wins,
            });

        GlobalStats {
            total_matches,
            total_users: inner.users.len(),
            matches_today,
            top_player,
        }
    }

    /// Most recent matches across all users, newest first.
    pub fn recent_matches(&self, limit: usize) -> Vec<RecentMatch> {
        let limit = limit.clamp(1, RECENT_MAX);
        let inner = self.inner.lock().unwrap();

        let mut rows: Vec<RecentMatch> = inner
            .users
            .values()
            .filter_map(|u| inner.profiles.get(&u.id).map(|p| (u, p)))
            .flat_map(|(u, p)| {
                p.history.iter().map(|r| RecentMatch {
                    username: u.username.clone(),
                    user_choice: r.user,
                    opponent_choice: r.opponent,
                    outcome: r.outcome,
                    played_at: r.played_at,
                })
            })
            .collect();

        rows.sort_by(|a, b| b.played_at.cmp(&a.played_at));
        rows.truncate(limit);
        rows
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
