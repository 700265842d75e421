use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::leaderboard::TournamentStatus;
use crate::model::team::TeamScoreResult;

/// The persisted result of one scoring pass over a tournament.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoringSnapshot {
    pub tournament_id: String,
    pub data_hash: String,
    /// Digest of the rosters and scoring policy the team scores came from.
    /// Empty when the writer did not record them.
    #[serde(default)]
    pub inputs_hash: String,
    pub tournament_status: TournamentStatus,
    pub team_scores: Vec<TeamScoreResult>,
    pub calculated_at: DateTime<Utc>,
}

impl ScoringSnapshot {
    #[must_use]
    pub fn age_minutes(&self, now: DateTime<Utc>) -> i64 {
        (now - self.calculated_at).num_minutes()
    }
}

/// What the scoring service hands back to the HTTP layer.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ScoringOutcome {
    pub team_scores: Vec<TeamScoreResult>,
    pub tournament_status: TournamentStatus,
    pub reused_snapshot: bool,
    pub persisted: bool,
    pub calculated_at: DateTime<Utc>,
    pub last_refresh: String,
}
