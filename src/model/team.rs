use serde::{Deserialize, Serialize};

/// A fantasy team: a name plus the golfers drafted onto it, in roster order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamDefinition {
    pub team_name: String,
    pub golfer_names: Vec<String>,
    #[serde(default)]
    pub participates_in_annual: bool,
}

/// Status reported for a roster name with no leaderboard match.
pub const MISSING_STATUS: &str = "Missing";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRoundScore {
    pub round_id: i32,
    /// Relative to par; `None` when the golfer has nothing for the round.
    pub score: Option<i32>,
    pub strokes: Option<i32>,
    pub is_live: bool,
    pub is_penalty: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedPlayer {
    pub name: String,
    pub status: String,
    pub is_cut: bool,
    /// Tournament total relative to par. For eliminated players this is the
    /// shared cut baseline.
    pub total: Option<i32>,
    /// The total exactly as the provider reported it.
    pub source_total: Option<i32>,
    pub position: Option<String>,
    pub thru: Option<String>,
    pub current_round: Option<i32>,
    pub rounds: Vec<PlayerRoundScore>,
}

impl ProcessedPlayer {
    #[must_use]
    pub fn missing(name: &str, num_rounds: i32) -> Self {
        Self {
            name: name.trim().to_string(),
            status: MISSING_STATUS.to_string(),
            is_cut: false,
            total: None,
            source_total: None,
            position: None,
            thru: None,
            current_round: None,
            rounds: (1..=num_rounds)
                .map(|round_id| PlayerRoundScore {
                    round_id,
                    score: None,
                    strokes: None,
                    is_live: false,
                    is_penalty: false,
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn round_score(&self, round_id: i32) -> Option<&PlayerRoundScore> {
        self.rounds.iter().find(|r| r.round_id == round_id)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoundDetail {
    pub round_id: i32,
    /// Sum of the best N golfer scores, `None` when fewer than N posted.
    pub score: Option<i32>,
    /// How many of the counted scores were synthesized cut penalties.
    pub penalty_count: usize,
    /// How many golfers had a score for the round at all.
    pub valid_count: usize,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamScoreResult {
    pub team_name: String,
    pub total_score: Option<i32>,
    pub players: Vec<ProcessedPlayer>,
    pub valid_rounds: usize,
    pub round_details: Vec<RoundDetail>,
    #[serde(default)]
    pub participates_in_annual: bool,
}

/// A team result with its place in the standings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    pub position: usize,
    pub tied: bool,
    #[serde(flatten)]
    pub result: TeamScoreResult,
}
