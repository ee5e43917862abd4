//! Rally Score - live scoring for tennis and padel matches
//!
//! Core modules:
//! - `score`: Scoring state machine (points, games, sets, tie-breaks)
//! - `rules`: Match rules and sport presets
//! - `session`: Undo, player names and match log around an engine
//! - `history`: Finished match records
//! - `rally`: Seeded point generator for demo matches

pub mod error;
pub mod history;
pub mod rally;
pub mod rules;
pub mod score;
pub mod session;

pub use error::ScoreError;
pub use history::{MatchHistory, MatchRecord};
pub use rules::{MatchRules, SportType};
pub use score::{MatchState, ScoreEngine, ScoreEvent, Side};
pub use session::{ScoreSession, ScoreView};

/// Scoring constants
pub mod consts {
    /// Points needed to win a tie-break, whatever the trigger score
    pub const TIE_BREAK_POINTS: u32 = 7;
    /// Winning margin in a tie-break
    pub const TIE_BREAK_LEAD: u32 = 2;
    /// Game score recorded for a set decided by tie-break (winner, loser)
    pub const TIE_BREAK_SET_GAMES: (u32, u32) = (7, 6);

    /// Undo steps kept by a session
    pub const MAX_UNDO: usize = 50;
    /// Finished matches kept in the log
    pub const MAX_MATCH_RECORDS: usize = 50;

    pub const DEFAULT_LEFT_NAME: &str = "Left";
    pub const DEFAULT_RIGHT_NAME: &str = "Right";
}
