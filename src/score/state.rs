//! Match state and score types
//!
//! Everything here is plain data. Only `ScoreEngine` mutates a `MatchState`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two competitors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Score within a classic game
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Point {
    #[default]
    Love,
    Fifteen,
    Thirty,
    Forty,
    Advantage,
}

impl Point {
    /// Scoreboard label
    pub fn label(&self) -> &'static str {
        match self {
            Point::Love => "0",
            Point::Fifteen => "15",
            Point::Thirty => "30",
            Point::Forty => "40",
            Point::Advantage => "AD",
        }
    }
}

/// Counters for one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideState {
    pub points: Point,
    /// Games won in the set being played
    pub games: u32,
    /// Sets won in the match
    pub sets: u32,
}

/// How a completed set was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TieBreak {
    NotPlayed,
    Decided { winner_points: u32, loser_points: u32 },
}

/// A finished set. Built once by the engine, never changed.
///
/// Serialises for display and export but can't be read back, so every
/// record in a `MatchState` came from scoring:
///
/// ```compile_fail
/// let _: rally_score::score::SetRecord = serde_json::from_str("{}").unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SetRecord {
    left_games: u32,
    right_games: u32,
    tie_break: TieBreak,
}

impl SetRecord {
    pub(crate) fn new(left_games: u32, right_games: u32, tie_break: TieBreak) -> Self {
        Self {
            left_games,
            right_games,
            tie_break,
        }
    }

    pub fn left_games(&self) -> u32 {
        self.left_games
    }

    pub fn right_games(&self) -> u32 {
        self.right_games
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    pub fn winner(&self) -> Side {
        if self.left_games > self.right_games {
            Side::Left
        } else {
            Side::Right
        }
    }
}

impl fmt::Display for SetRecord {
    /// "6-4", or "7-6(5)" with the tie-break loser's points
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.left_games, self.right_games)?;
        if let TieBreak::Decided { loser_points, .. } = self.tie_break {
            write!(f, "({})", loser_points)?;
        }
        Ok(())
    }
}

/// Which scoring mode the match is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Classic 0-15-30-40 game scoring
    InGame,
    /// Raw point counting until someone reaches 7 with a two point lead
    InTieBreak,
    /// Terminal; points are ignored
    Finished,
}

/// Complete runtime state of a match
///
/// Only `ScoreEngine` produces these; a copy can go back in through
/// `ScoreEngine::restore`, which checks it first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchState {
    pub left: SideState,
    pub right: SideState,
    /// Side currently serving
    pub server: Side,
    pub in_tie_break: bool,
    /// Raw tie-break points, only meaningful while `in_tie_break`
    pub tie_break_left: u32,
    pub tie_break_right: u32,
    pub finished: bool,
    /// Completed sets, oldest first
    pub completed_sets: Vec<SetRecord>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            left: SideState::default(),
            right: SideState::default(),
            server: Side::Left,
            in_tie_break: false,
            tie_break_left: 0,
            tie_break_right: 0,
            finished: false,
            completed_sets: Vec::new(),
        }
    }
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub(crate) fn side_mut(&mut self, side: Side) -> &mut SideState {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn tie_break_points(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.tie_break_left,
            Side::Right => self.tie_break_right,
        }
    }

    pub(crate) fn tie_break_points_mut(&mut self, side: Side) -> &mut u32 {
        match side {
            Side::Left => &mut self.tie_break_left,
            Side::Right => &mut self.tie_break_right,
        }
    }

    pub fn server_left(&self) -> bool {
        self.server == Side::Left
    }

    pub fn phase(&self) -> MatchPhase {
        if self.finished {
            MatchPhase::Finished
        } else if self.in_tie_break {
            MatchPhase::InTieBreak
        } else {
            MatchPhase::InGame
        }
    }

    /// Side holding more sets once the match is over
    pub fn winner(&self) -> Option<Side> {
        if !self.finished || self.left.sets == self.right.sets {
            return None;
        }
        if self.left.sets > self.right.sets {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// Set-by-set line such as "6-0 7-6(5) 2-1"
    ///
    /// The set in progress is appended once either side has a game.
    pub fn set_summary(&self) -> String {
        let mut parts: Vec<String> = self.completed_sets.iter().map(|s| s.to_string()).collect();
        if self.left.games != 0 || self.right.games != 0 {
            parts.push(format!("{}-{}", self.left.games, self.right.games));
        }
        parts.join(" ")
    }
}
