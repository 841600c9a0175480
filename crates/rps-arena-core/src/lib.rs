//! RPS Arena Core Library
//!
//! This crate provides the rules and statistics logic for the
//! rock-paper-scissors arena: outcome resolution, running counters and
//! streaks, history-based trend analysis, and a bulk simulation harness.

pub mod error;
pub mod game;
pub mod stats;

pub use error::GameError;
pub use game::{resolve, Choice, Outcome};
pub use stats::{
    analyze, simulate, suggest, summarize, Analysis, ChoiceTally, MatchHistory, MatchRecord,
    PairingGrid, Percentages, PerformanceSummary, ProfileSnapshot, SimulationReport, SkillLevel,
    StatsState, Suggestion, LOCAL_HISTORY_CAP, MAX_SIMULATED_ROUNDS, SERVER_HISTORY_CAP,
};
