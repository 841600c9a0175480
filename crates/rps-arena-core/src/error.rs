//! Error types for game operations.

use thiserror::Error;

/// Errors from game and statistics operations.
///
/// All variants are local, recoverable conditions reported to the immediate
/// caller; none are fatal. Operations are deterministic, so retrying without
/// changed input reproduces the same error.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid choice: {0:?}")]
    InvalidChoice(String),

    #[error("Invalid simulation count: {requested} (must be 1..={max})")]
    InvalidSimulationCount { requested: u32, max: u32 },
}
