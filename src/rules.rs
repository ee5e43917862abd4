//! Match rules and sport presets
//!
//! Rules are fixed for the lifetime of a match. They can be built in code,
//! picked from a sport preset, or loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

/// Sport being played (informational only, both share the same scoring)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SportType {
    #[default]
    Tennis,
    Padel,
}

impl SportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SportType::Tennis => "Tennis",
            SportType::Padel => "Padel",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "tennis" => Some(SportType::Tennis),
            "padel" | "paddle" => Some(SportType::Padel),
            _ => None,
        }
    }
}

/// Scoring rules for one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRules {
    pub sport: SportType,
    /// Sets needed to win the match
    pub sets_to_win: u32,
    /// Games needed to win a set (with a two game lead)
    pub games_per_set: u32,
    /// Game score, on both sides, at which a tie-break starts
    pub tie_break_at: u32,
    /// Reserved for a longer final-set tie-break; not read by the engine
    pub final_set_super_tie_break: bool,
    /// Reserved for sudden-death deuce; not read by the engine
    pub golden_point: bool,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            sport: SportType::Tennis,
            sets_to_win: 2,
            games_per_set: 6,
            tie_break_at: 6,
            final_set_super_tie_break: false,
            golden_point: false,
        }
    }
}

impl MatchRules {
    /// Standard best-of-three rules for a sport
    pub fn from_sport(sport: SportType) -> Self {
        Self {
            sport,
            ..Self::default()
        }
    }

    /// Reject configurations the engine can't score sensibly
    pub fn validate(&self) -> Result<(), ScoreError> {
        if self.sets_to_win == 0 {
            return Err(ScoreError::NoSetsToWin);
        }
        if self.games_per_set == 0 {
            return Err(ScoreError::NoGamesPerSet);
        }
        if self.tie_break_at == 0 {
            return Err(ScoreError::NoTieBreakTrigger);
        }
        Ok(())
    }

    /// Parse rules from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, ScoreError> {
        let rules: Self = serde_json::from_str(json)?;
        rules.validate()?;
        log::info!(
            "Loaded {} rules: first to {} sets, {} games per set, tie-break at {}",
            rules.sport.as_str(),
            rules.sets_to_win,
            rules.games_per_set,
            rules.tie_break_at
        );
        Ok(rules)
    }

    pub fn to_json(&self) -> Result<String, ScoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_best_of_three() {
        let rules = MatchRules::default();
        assert_eq!(rules.sport, SportType::Tennis);
        assert_eq!(rules.sets_to_win, 2);
        assert_eq!(rules.games_per_set, 6);
        assert_eq!(rules.tie_break_at, 6);
        assert!(!rules.final_set_super_tie_break);
        assert!(!rules.golden_point);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_padel_preset_keeps_scoring() {
        let rules = MatchRules::from_sport(SportType::Padel);
        assert_eq!(rules.sport, SportType::Padel);
        assert_eq!(rules.sets_to_win, MatchRules::default().sets_to_win);
    }

    #[test]
    fn test_sport_from_str() {
        assert_eq!(SportType::from_str("TENNIS"), Some(SportType::Tennis));
        assert_eq!(SportType::from_str(" padel "), Some(SportType::Padel));
        assert_eq!(SportType::from_str("squash"), None);
    }

    #[test]
    fn test_validate_rejects_zeroes() {
        let rules = MatchRules {
            sets_to_win: 0,
            ..Default::default()
        };
        assert!(matches!(rules.validate(), Err(ScoreError::NoSetsToWin)));

        let rules = MatchRules {
            games_per_set: 0,
            ..Default::default()
        };
        assert!(matches!(rules.validate(), Err(ScoreError::NoGamesPerSet)));

        let rules = MatchRules {
            tie_break_at: 0,
            ..Default::default()
        };
        assert!(matches!(rules.validate(), Err(ScoreError::NoTieBreakTrigger)));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let rules = MatchRules::from_json(r#"{"sport":"Padel","sets_to_win":3}"#).unwrap();
        assert_eq!(rules.sport, SportType::Padel);
        assert_eq!(rules.sets_to_win, 3);
        assert_eq!(rules.games_per_set, 6);
    }

    #[test]
    fn test_from_json_validates() {
        let err = MatchRules::from_json(r#"{"games_per_set":0}"#).unwrap_err();
        assert!(matches!(err, ScoreError::NoGamesPerSet));

        let err = MatchRules::from_json("not json").unwrap_err();
        assert!(matches!(err, ScoreError::Json(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let rules = MatchRules {
            sets_to_win: 3,
            golden_point: true,
            ..MatchRules::from_sport(SportType::Padel)
        };
        let json = rules.to_json().unwrap();
        assert_eq!(MatchRules::from_json(&json).unwrap(), rules);
    }
}
