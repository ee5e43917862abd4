//! Error types
//!
//! Scoring itself never fails; errors only come from building or loading
//! configuration and history.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("sets to win must be at least 1")]
    NoSetsToWin,

    #[error("games per set must be at least 1")]
    NoGamesPerSet,

    #[error("tie-break trigger must be at least 1 game")]
    NoTieBreakTrigger,

    #[error("inconsistent match state: {0}")]
    InvalidState(&'static str),

    #[error("match record ids exhausted at {id}")]
    HistoryIdExhausted { id: u64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
