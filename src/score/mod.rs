//! Scoring core
//!
//! Pure, synchronous and single-owner:
//! - `state`: plain data describing a match in progress
//! - `engine`: the only code allowed to change that data

pub mod engine;
pub mod state;

pub use engine::{PointOutcome, ScoreEngine, ScoreEvent, advance_point};
pub use state::{MatchPhase, MatchState, Point, SetRecord, Side, SideState, TieBreak};
