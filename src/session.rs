//! Scorekeeping session
//!
//! Wraps a `ScoreEngine` with the bits a scoreboard needs around it: player
//! names, undo, manual end of match, and a log of finished matches.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_LEFT_NAME, DEFAULT_RIGHT_NAME, MAX_UNDO};
use crate::history::MatchHistory;
use crate::rules::{MatchRules, SportType};
use crate::score::{MatchState, ScoreEngine, ScoreEvent, Side};

/// Everything a scoreboard renders, detached from the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    pub left_name: String,
    pub right_name: String,
    pub sport: SportType,
    pub left_points: String,
    pub right_points: String,
    pub left_games: u32,
    pub right_games: u32,
    pub left_sets: u32,
    pub right_sets: u32,
    pub server_left: bool,
    pub in_tie_break: bool,
    /// Live tie-break counters (zero outside a tie-break)
    pub tie_break_left: u32,
    pub tie_break_right: u32,
    pub finished: bool,
    pub set_summary: String,
    pub compact: String,
}

pub struct ScoreSession {
    engine: ScoreEngine,
    left_name: String,
    right_name: String,
    /// Previous states, newest at the back
    undo: VecDeque<MatchState>,
    history: MatchHistory,
}

fn name_or(name: &str, fallback: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        fallback.to_string()
    } else {
        name.to_string()
    }
}

impl ScoreSession {
    pub fn new(rules: MatchRules, left_name: &str, right_name: &str) -> Self {
        Self::with_history(rules, left_name, right_name, MatchHistory::new())
    }

    /// Start a session on top of a previously saved match log
    pub fn with_history(
        rules: MatchRules,
        left_name: &str,
        right_name: &str,
        history: MatchHistory,
    ) -> Self {
        Self {
            engine: ScoreEngine::new(rules),
            left_name: name_or(left_name, DEFAULT_LEFT_NAME),
            right_name: name_or(right_name, DEFAULT_RIGHT_NAME),
            undo: VecDeque::with_capacity(MAX_UNDO),
            history,
        }
    }

    /// Replace the current match. History is kept, undo is not.
    pub fn start_new_match(&mut self, rules: MatchRules, left_name: &str, right_name: &str) {
        self.engine = ScoreEngine::new(rules);
        self.left_name = name_or(left_name, DEFAULT_LEFT_NAME);
        self.right_name = name_or(right_name, DEFAULT_RIGHT_NAME);
        self.undo.clear();
        log::info!(
            "New {} match: {} vs {}",
            self.engine.rules().sport.as_str(),
            self.left_name,
            self.right_name
        );
    }

    pub fn engine(&self) -> &ScoreEngine {
        &self.engine
    }

    pub fn state(&self) -> &MatchState {
        self.engine.state()
    }

    pub fn history(&self) -> &MatchHistory {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn point_to(&mut self, side: Side) -> ScoreEvent {
        self.push_undo();
        let was_finished = self.engine.is_finished();
        let event = self.engine.point_to(side);
        if !was_finished && self.engine.is_finished() {
            self.record_match();
        }
        event
    }

    pub fn toggle_server(&mut self) {
        self.push_undo();
        self.engine.toggle_server();
    }

    /// Clear the score. Can be undone.
    pub fn reset(&mut self) {
        self.push_undo();
        self.engine.reset();
    }

    /// Step back one action. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.undo.pop_back() {
            Some(previous) => match self.engine.restore(previous) {
                Ok(()) => {
                    log::debug!("Undo -> {}", self.engine.render_compact());
                    true
                }
                Err(e) => {
                    log::warn!("Undo dropped: {}", e);
                    false
                }
            },
            None => false,
        }
    }

    /// End the match now and log it, whatever the score
    pub fn end_match(&mut self) {
        self.push_undo();
        if !self.engine.is_finished() {
            self.engine.conclude();
            self.record_match();
        }
    }

    pub fn view(&self) -> ScoreView {
        let s = self.engine.state();
        ScoreView {
            left_name: self.left_name.clone(),
            right_name: self.right_name.clone(),
            sport: self.engine.rules().sport,
            left_points: s.left.points.label().to_string(),
            right_points: s.right.points.label().to_string(),
            left_games: s.left.games,
            right_games: s.right.games,
            left_sets: s.left.sets,
            right_sets: s.right.sets,
            server_left: s.server_left(),
            in_tie_break: s.in_tie_break,
            tie_break_left: s.tie_break_left,
            tie_break_right: s.tie_break_right,
            finished: s.finished,
            set_summary: s.set_summary(),
            compact: self.engine.render_compact(),
        }
    }

    fn push_undo(&mut self) {
        if self.undo.len() >= MAX_UNDO {
            self.undo.pop_front();
        }
        self.undo.push_back(self.engine.snapshot());
    }

    fn record_match(&mut self) {
        if let Err(e) = self.history.record(
            self.engine.rules().sport,
            &self.left_name,
            &self.right_name,
            self.engine.state(),
        ) {
            log::warn!("Match not recorded: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_rules() -> MatchRules {
        MatchRules {
            sets_to_win: 1,
            games_per_set: 2,
            tie_break_at: 2,
            ..Default::default()
        }
    }

    fn win_game(session: &mut ScoreSession, side: Side) {
        for _ in 0..4 {
            session.point_to(side);
        }
    }

    #[test]
    fn test_blank_names_fall_back() {
        let session = ScoreSession::new(MatchRules::default(), "  ", "");
        let view = session.view();
        assert_eq!(view.left_name, DEFAULT_LEFT_NAME);
        assert_eq!(view.right_name, DEFAULT_RIGHT_NAME);
    }

    #[test]
    fn test_view_tracks_points() {
        let mut session = ScoreSession::new(MatchRules::default(), "Ana", "Bo");
        session.point_to(Side::Left);
        session.point_to(Side::Right);
        session.point_to(Side::Right);

        let view = session.view();
        assert_eq!(view.left_name, "Ana");
        assert_eq!(view.left_points, "15");
        assert_eq!(view.right_points, "30");
        assert!(view.server_left);
        assert_eq!(view.compact, "0-0 0-0*");
        assert!(!view.finished);
    }

    #[test]
    fn test_undo_steps_back() {
        let mut session = ScoreSession::new(MatchRules::default(), "Ana", "Bo");
        assert!(!session.undo());

        session.point_to(Side::Left);
        session.toggle_server();
        assert!(!session.state().server_left());

        assert!(session.undo());
        assert!(session.state().server_left());
        assert!(session.undo());
        assert_eq!(session.state(), &MatchState::new());
        assert!(!session.can_undo());
    }

    #[test]
    fn test_undo_is_capped() {
        let mut session = ScoreSession::new(MatchRules::default(), "Ana", "Bo");
        for _ in 0..MAX_UNDO + 10 {
            session.toggle_server();
        }
        let mut steps = 0;
        while session.undo() {
            steps += 1;
        }
        assert_eq!(steps, MAX_UNDO);
    }

    #[test]
    fn test_reset_can_be_undone() {
        let mut session = ScoreSession::new(MatchRules::default(), "Ana", "Bo");
        win_game(&mut session, Side::Left);
        session.reset();
        assert_eq!(session.view().left_games, 0);
        assert!(session.undo());
        assert_eq!(session.view().left_games, 1);
    }

    #[test]
    fn test_finished_match_is_recorded_once() {
        let mut session = ScoreSession::new(quick_rules(), "Ana", "Bo");
        win_game(&mut session, Side::Right);
        assert!(!session.view().finished);
        win_game(&mut session, Side::Right);
        assert!(session.view().finished);
        assert_eq!(session.history().len(), 1);

        // Points after the end change nothing and record nothing
        session.point_to(Side::Left);
        assert_eq!(session.history().len(), 1);

        let record = session.history().latest().unwrap();
        assert_eq!(record.right_name, "Bo");
        assert_eq!(record.right_sets, 1);
        assert_eq!(record.set_summary, "0-2");
    }

    #[test]
    fn test_end_match_records_partial_score() {
        let mut session = ScoreSession::new(MatchRules::default(), "Ana", "Bo");
        win_game(&mut session, Side::Left);
        session.end_match();
        assert!(session.view().finished);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history().latest().unwrap().left_games, 1);
        assert_eq!(session.history().latest().unwrap().set_summary, "1-0");

        // Already finished: nothing new is logged
        session.end_match();
        assert_eq!(session.history().len(), 1);

        assert!(session.undo());
        assert!(session.undo());
        assert!(!session.view().finished);
    }

    #[test]
    fn test_start_new_match_keeps_history() {
        let mut session = ScoreSession::new(quick_rules(), "Ana", "Bo");
        win_game(&mut session, Side::Left);
        win_game(&mut session, Side::Left);
        assert_eq!(session.history().len(), 1);
        session.start_new_match(MatchRules::from_sport(SportType::Padel), "Cy", "");

        let view = session.view();
        assert_eq!(view.sport, SportType::Padel);
        assert_eq!(view.left_name, "Cy");
        assert_eq!(view.right_name, DEFAULT_RIGHT_NAME);
        assert!(!view.finished);
        assert!(!session.can_undo());
        assert_eq!(session.history().len(), 1);

        session.clear_history();
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_view_shows_tie_break() {
        let rules = MatchRules {
            games_per_set: 1,
            tie_break_at: 1,
            ..Default::default()
        };
        let mut session = ScoreSession::new(rules, "Ana", "Bo");
        // 0-0 -> Left wins 1-0, lead 1 so no set; Right levels 1-1 -> tie-break
        win_game(&mut session, Side::Left);
        win_game(&mut session, Side::Right);
        session.point_to(Side::Right);

        let view = session.view();
        assert!(view.in_tie_break);
        assert_eq!(view.tie_break_left, 0);
        assert_eq!(view.tie_break_right, 1);
        assert_eq!(view.set_summary, "1-1");
    }
}
