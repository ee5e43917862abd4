//! Point-by-point scoring
//!
//! `ScoreEngine` owns the `MatchState` and is the only thing that changes it.
//! Each call advances the match by exactly one step and never fails.

use serde::{Deserialize, Serialize};

use super::state::{MatchState, Point, SetRecord, Side, TieBreak};
use crate::consts::{TIE_BREAK_LEAD, TIE_BREAK_POINTS, TIE_BREAK_SET_GAMES};
use crate::error::ScoreError;
use crate::rules::MatchRules;

/// Result of one point in a classic game, from the scorer's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointOutcome {
    /// Game continues with these points (scorer, opponent)
    Rally { scorer: Point, opponent: Point },
    /// Scorer takes the game
    GameWon,
}

/// Classic game transition: 0 -> 15 -> 30 -> 40 -> Ad -> Game
pub fn advance_point(scorer: Point, opponent: Point) -> PointOutcome {
    use Point::*;
    let rally = |scorer, opponent| PointOutcome::Rally { scorer, opponent };
    match (scorer, opponent) {
        (Love, o) => rally(Fifteen, o),
        (Fifteen, o) => rally(Thirty, o),
        (Thirty, o) => rally(Forty, o),
        (Forty, Forty) => rally(Advantage, Forty),
        // Opponent loses the advantage: back to deuce
        (Forty, Advantage) => rally(Forty, Forty),
        (Forty, _) | (Advantage, _) => PointOutcome::GameWon,
    }
}

/// What a call to `point_to` did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreEvent {
    /// Match already over, nothing changed
    Ignored,
    /// Point scored, game still running
    Point,
    GameWon(Side),
    /// Game won and games are level at the trigger score
    TieBreakStarted,
    SetWon(Side),
    MatchWon(Side),
}

/// Scoring state machine for one match
#[derive(Debug, Clone)]
pub struct ScoreEngine {
    rules: MatchRules,
    state: MatchState,
}

impl ScoreEngine {
    /// Create an engine for a fresh match. Rules are not checked.
    pub fn new(rules: MatchRules) -> Self {
        Self {
            rules,
            state: MatchState::new(),
        }
    }

    /// Like `new`, but refuse rules that can't produce a result
    pub fn try_new(rules: MatchRules) -> Result<Self, ScoreError> {
        rules.validate()?;
        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &MatchRules {
        &self.rules
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> MatchState {
        self.state.clone()
    }

    /// Replace the whole state with one taken earlier by `snapshot`.
    ///
    /// States that scoring could never have produced under these rules are
    /// refused and the current state is kept.
    pub fn restore(&mut self, state: MatchState) -> Result<(), ScoreError> {
        self.check_state(&state)?;
        self.state = state;
        Ok(())
    }

    fn check_state(&self, state: &MatchState) -> Result<(), ScoreError> {
        let won_by = |side| state.completed_sets.iter().filter(|s| s.winner() == side).count();
        if won_by(Side::Left) != state.left.sets as usize
            || won_by(Side::Right) != state.right.sets as usize
        {
            return Err(ScoreError::InvalidState("set counts don't match completed sets"));
        }
        let sets_to_win = self.rules.sets_to_win;
        if !state.finished && (state.left.sets >= sets_to_win || state.right.sets >= sets_to_win) {
            return Err(ScoreError::InvalidState("match won but not finished"));
        }
        if state.in_tie_break {
            if state.left.points != Point::Love || state.right.points != Point::Love {
                return Err(ScoreError::InvalidState("game points during a tie-break"));
            }
        } else if state.tie_break_left != 0 || state.tie_break_right != 0 {
            return Err(ScoreError::InvalidState("tie-break points outside a tie-break"));
        }
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.state.finished
    }

    /// Register one point for `side`
    pub fn point_to(&mut self, side: Side) -> ScoreEvent {
        if self.state.finished {
            return ScoreEvent::Ignored;
        }
        if self.state.in_tie_break {
            return self.tie_break_point(side);
        }

        let scorer = self.state.side(side).points;
        let opponent = self.state.side(side.opponent()).points;
        match advance_point(scorer, opponent) {
            PointOutcome::Rally { scorer, opponent } => {
                self.state.side_mut(side).points = scorer;
                self.state.side_mut(side.opponent()).points = opponent;
                ScoreEvent::Point
            }
            PointOutcome::GameWon => self.win_game(side),
        }
    }

    pub fn toggle_server(&mut self) {
        self.state.server = self.state.server.opponent();
    }

    /// Start over under the same rules
    pub fn reset(&mut self) {
        self.state = MatchState::new();
    }

    /// Stop the match where it stands. Further points are ignored.
    pub fn conclude(&mut self) {
        if !self.state.finished {
            log::info!("Match ended early at {}", self.render_compact());
            self.state.finished = true;
        }
    }

    /// "sets games" line, e.g. "1-0 3-2*" (asterisk when Left serves)
    pub fn render_compact(&self) -> String {
        let s = &self.state;
        format!(
            "{}-{} {}-{}{}",
            s.left.sets,
            s.right.sets,
            s.left.games,
            s.right.games,
            if s.server_left() { "*" } else { "" }
        )
    }

    fn win_game(&mut self, winner: Side) -> ScoreEvent {
        self.state.side_mut(winner).games += 1;
        self.state.left.points = Point::Love;
        self.state.right.points = Point::Love;
        self.toggle_server();

        let won = self.state.side(winner).games;
        let lost = self.state.side(winner.opponent()).games;
        log::debug!("Game {:?}: {}", winner, self.render_compact());

        if won == self.rules.tie_break_at && lost == self.rules.tie_break_at {
            self.state.in_tie_break = true;
            self.state.tie_break_left = 0;
            self.state.tie_break_right = 0;
            log::info!("Tie-break at {}-{}", won, lost);
            return ScoreEvent::TieBreakStarted;
        }

        if won >= self.rules.games_per_set && won.saturating_sub(lost) >= 2 {
            return self.finish_set(winner, TieBreak::NotPlayed);
        }

        ScoreEvent::GameWon(winner)
    }

    fn tie_break_point(&mut self, side: Side) -> ScoreEvent {
        *self.state.tie_break_points_mut(side) += 1;

        let scored = self.state.tie_break_points(side);
        let other = self.state.tie_break_points(side.opponent());
        // Only the scorer can have just crossed the line
        if scored < TIE_BREAK_POINTS || scored < other + TIE_BREAK_LEAD {
            return ScoreEvent::Point;
        }

        let (winner_games, loser_games) = TIE_BREAK_SET_GAMES;
        self.state.side_mut(side).games = winner_games;
        self.state.side_mut(side.opponent()).games = loser_games;
        self.state.in_tie_break = false;
        self.state.tie_break_left = 0;
        self.state.tie_break_right = 0;

        // Server deliberately left as is after a tie-break set
        self.finish_set(
            side,
            TieBreak::Decided {
                winner_points: scored,
                loser_points: other,
            },
        )
    }

    fn finish_set(&mut self, winner: Side, tie_break: TieBreak) -> ScoreEvent {
        let record = SetRecord::new(self.state.left.games, self.state.right.games, tie_break);
        log::info!("Set {:?}: {}", winner, record);
        self.state.completed_sets.push(record);

        self.state.side_mut(winner).sets += 1;
        self.state.left.games = 0;
        self.state.right.games = 0;

        if self.state.side(winner).sets >= self.rules.sets_to_win {
            self.state.finished = true;
            log::info!("Match {:?}: {}", winner, self.state.set_summary());
            return ScoreEvent::MatchWon(winner);
        }
        ScoreEvent::SetWon(winner)
    }
}
