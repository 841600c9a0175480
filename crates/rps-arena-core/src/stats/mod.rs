//! Statistics aggregation: counters, history, analysis, and simulation.

mod analysis;
mod history;
mod simulate;
mod snapshot;
mod state;
mod summary;

pub use analysis::{analyze, suggest, Analysis, ChoiceTally, PairingGrid, Suggestion};
pub use history::{MatchHistory, MatchRecord, LOCAL_HISTORY_CAP, SERVER_HISTORY_CAP};
pub use simulate::{simulate, SimulationReport, MAX_SIMULATED_ROUNDS};
pub use snapshot::ProfileSnapshot;
pub use state::{Percentages, StatsState};
pub use summary::{summarize, PerformanceSummary, SkillLevel};
