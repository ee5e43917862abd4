//! Finished match log
//!
//! Newest match first, capped at `MAX_MATCH_RECORDS`. Storage is left to the
//! caller; this module only converts to and from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_MATCH_RECORDS;
use crate::error::ScoreError;
use crate::rules::SportType;
use crate::score::MatchState;

/// Summary of one finished (or manually ended) match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: u64,
    pub sport: SportType,
    pub left_name: String,
    pub right_name: String,
    /// e.g. "6-0 7-6(5)"
    pub set_summary: String,
    pub left_sets: u32,
    pub right_sets: u32,
    /// Games of the set in progress when the match ended
    pub left_games: u32,
    pub right_games: u32,
}

/// Match log, newest first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MatchHistory {
    records: Vec<MatchRecord>,
    #[serde(default)]
    next_id: u64,
}

impl MatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the final state of a match. Returns the new record's id.
    ///
    /// Ids are unique and below `u64::MAX`; once they run out nothing more
    /// is recorded.
    pub fn record(
        &mut self,
        sport: SportType,
        left_name: &str,
        right_name: &str,
        state: &MatchState,
    ) -> Result<u64, ScoreError> {
        let mut id = self.next_id;
        for r in &self.records {
            let after = r.id.checked_add(1).ok_or(ScoreError::HistoryIdExhausted { id: r.id })?;
            id = id.max(after);
        }
        self.next_id = id.checked_add(1).ok_or(ScoreError::HistoryIdExhausted { id })?;

        let record = MatchRecord {
            id,
            sport,
            left_name: left_name.to_string(),
            right_name: right_name.to_string(),
            set_summary: state.set_summary(),
            left_sets: state.left.sets,
            right_sets: state.right.sets,
            left_games: state.left.games,
            right_games: state.right.games,
        };
        log::info!(
            "Recorded match {}: {} vs {} {}",
            id,
            record.left_name,
            record.right_name,
            record.set_summary
        );

        self.records.insert(0, record);
        self.records.truncate(MAX_MATCH_RECORDS);
        Ok(id)
    }

    /// All records, newest first
    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Most recent match (if any)
    pub fn latest(&self) -> Option<&MatchRecord> {
        self.records.first()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn to_json(&self) -> Result<String, ScoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ScoreError> {
        let mut history: MatchHistory = serde_json::from_str(json)?;
        if let Some(id) = history.records.iter().map(|r| r.id).find(|&id| id == u64::MAX) {
            return Err(ScoreError::HistoryIdExhausted { id });
        }
        history.records.truncate(MAX_MATCH_RECORDS);
        log::info!("Loaded {} match records", history.records.len());
        Ok(history)
    }
}
