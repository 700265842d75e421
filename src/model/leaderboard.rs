use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::normalize::{
    RawScore, par_text, parse_live_score, parse_round_id, parse_score_to_par, parse_strokes,
};

/// Statuses that remove a player from the competing field.
pub const ELIMINATED_STATUSES: &[&str] = &["CUT", "WD", "DQ", "WITHDRAWN", "DISQUALIFIED"];

#[must_use]
pub fn is_eliminated_status(status: &str) -> bool {
    let status = status.trim().to_ascii_uppercase();
    ELIMINATED_STATUSES.contains(&status.as_str())
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoundEntry {
    pub round_id: i32,
    pub strokes: Option<i32>,
    #[serde(with = "par_text", default)]
    pub score_to_par: Option<i32>,
    #[serde(default)]
    pub is_penalty: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
}

impl RoundEntry {
    /// Reads one provider round. Rounds without a usable round number are dropped.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let round_id = parse_round_id(value.get("roundId"))?;
        Some(Self {
            round_id,
            strokes: parse_strokes(value.get("strokes")),
            score_to_par: parse_score_to_par(value.get("scoreToPar")),
            is_penalty: value
                .get("isPenalty")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            course_id: text_field(value.get("courseId")),
            course_name: text_field(value.get("courseName")),
        })
    }
}

/// One player's line on the leaderboard, normalized.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default)]
    pub is_amateur: bool,
    pub rounds: Vec<RoundEntry>,
    #[serde(with = "par_text", default)]
    pub total: Option<i32>,
    #[serde(default)]
    pub total_strokes_from_completed_rounds: Option<i32>,
    #[serde(default)]
    pub current_round: Option<i32>,
    #[serde(with = "par_text", default)]
    pub current_round_score: Option<i32>,
    #[serde(default)]
    pub thru: Option<String>,
}

impl LeaderboardRow {
    /// Builds a row from the provider's JSON. Rounds outside `1..=num_rounds`
    /// are discarded and duplicates collapse to one entry per round, preferring
    /// an entry with known strokes.
    #[must_use]
    pub fn from_value(value: &Value, num_rounds: i32) -> Self {
        let mut rounds: Vec<RoundEntry> = Vec::new();
        for entry in value
            .get("rounds")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(RoundEntry::from_value)
            .filter(|r| (1..=num_rounds).contains(&r.round_id))
        {
            match rounds.iter_mut().find(|r| r.round_id == entry.round_id) {
                Some(existing) if existing.strokes.is_none() && entry.strokes.is_some() => {
                    *existing = entry;
                }
                Some(_) => {}
                None => rounds.push(entry),
            }
        }
        rounds.sort_by_key(|r| r.round_id);

        Self {
            player_id: text_field(value.get("playerId")),
            first_name: text_field(value.get("firstName")).unwrap_or_default(),
            last_name: text_field(value.get("lastName")).unwrap_or_default(),
            status: text_field(value.get("status")).unwrap_or_default(),
            position: text_field(value.get("position")),
            is_amateur: value
                .get("isAmateur")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            rounds,
            total: parse_score_to_par(value.get("total")),
            total_strokes_from_completed_rounds: parse_strokes(
                value.get("totalStrokesFromCompletedRounds"),
            ),
            current_round: parse_round_id(value.get("currentRound")),
            current_round_score: parse_live_score(value.get("currentRoundScore")),
            thru: text_field(value.get("thru")),
        }
    }

    /// First and last name joined the way roster entries are written.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    #[must_use]
    pub fn is_eliminated(&self) -> bool {
        is_eliminated_status(&self.status)
    }

    #[must_use]
    pub fn round(&self, round_id: i32) -> Option<&RoundEntry> {
        self.rounds.iter().find(|r| r.round_id == round_id)
    }

    #[must_use]
    pub fn strokes_for_round(&self, round_id: i32) -> Option<i32> {
        self.round(round_id).and_then(|r| r.strokes)
    }

    pub fn recompute_total_strokes(&mut self) {
        let known: Vec<i32> = self.rounds.iter().filter_map(|r| r.strokes).collect();
        self.total_strokes_from_completed_rounds = if known.is_empty() {
            None
        } else {
            Some(known.iter().sum())
        };
    }
}

/// Tournament-level state carried next to the rows.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TournamentStatus {
    pub status: String,
    pub is_official_complete: bool,
    pub is_complete: bool,
    pub is_in_progress: bool,
    #[serde(default)]
    pub current_round: Option<i32>,
    #[serde(default)]
    pub round_status: Option<String>,
    #[serde(default)]
    pub cut_score: Option<i32>,
}

impl TournamentStatus {
    #[must_use]
    pub fn from_document(doc: &Value) -> Self {
        let status = text_field(doc.get("status")).unwrap_or_default();
        let round_status = text_field(doc.get("roundStatus"));
        let folded = fold_status(&status);

        let is_official_complete = folded == "official";
        let is_complete = is_official_complete || folded == "complete" || folded == "completed";
        let round_in_progress = round_status
            .as_deref()
            .is_some_and(|s| fold_status(s) == "inprogress");
        let is_in_progress = !is_complete && (folded == "inprogress" || round_in_progress);

        let cut_score = doc
            .get("cutLines")
            .and_then(Value::as_array)
            .and_then(|lines| lines.first())
            .and_then(|line| parse_score_to_par(line.get("cutScore")));

        Self {
            status,
            is_official_complete,
            is_complete,
            is_in_progress,
            current_round: parse_round_id(doc.get("roundId")),
            round_status,
            cut_score,
        }
    }
}

fn fold_status(status: &str) -> String {
    status
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// A fetched leaderboard payload.
///
/// `raw_rows` keeps the rows exactly as received; the content hash is taken
/// over them, not over the normalized rows.
#[derive(Clone, Debug)]
pub struct LeaderboardDocument {
    pub rows: Vec<LeaderboardRow>,
    pub raw_rows: Vec<Value>,
    pub status: TournamentStatus,
}

impl LeaderboardDocument {
    /// # Errors
    ///
    /// Returns an error when the payload is not a JSON object or when
    /// `leaderboardRows` is present but is not an array.
    pub fn from_value(doc: &Value, num_rounds: i32) -> Result<Self, CoreError> {
        if !doc.is_object() {
            return Err(CoreError::Parse(
                "leaderboard document must be a JSON object".into(),
            ));
        }
        let raw_rows = match doc.get("leaderboardRows") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(rows)) => rows.clone(),
            Some(_) => {
                return Err(CoreError::Parse("leaderboardRows must be an array".into()));
            }
        };
        let rows = raw_rows
            .iter()
            .map(|row| LeaderboardRow::from_value(row, num_rounds))
            .collect();
        Ok(Self {
            rows,
            raw_rows,
            status: TournamentStatus::from_document(doc),
        })
    }
}

/// Text fields arrive as strings, numbers or BSON wrappers.
fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        other => match RawScore::classify(Some(other)) {
            RawScore::BsonWrapped(inner) => Some(inner.trim().to_string()),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn eliminated_status_is_case_and_space_tolerant() {
        assert!(is_eliminated_status("cut"));
        assert!(is_eliminated_status(" WD "));
        assert!(is_eliminated_status("Disqualified"));
        assert!(!is_eliminated_status("active"));
        assert!(!is_eliminated_status("complete"));
        assert!(!is_eliminated_status(""));
    }

    #[test]
    fn row_collapses_duplicate_and_out_of_range_rounds() {
        let row = LeaderboardRow::from_value(
            &json!({
                "firstName": "Scottie",
                "lastName": "Scheffler",
                "status": "active",
                "rounds": [
                    {"roundId": {"$numberInt": "2"}, "strokes": {"$numberInt": "67"}, "scoreToPar": "-5"},
                    {"roundId": 1, "strokes": null, "scoreToPar": ""},
                    {"roundId": 1, "strokes": "70", "scoreToPar": "-2", "courseId": 540},
                    {"roundId": 5, "strokes": 69, "scoreToPar": "-3"},
                    {"strokes": 71}
                ]
            }),
            4,
        );
        assert_eq!(row.name(), "Scottie Scheffler");
        let ids: Vec<i32> = row.rounds.iter().map(|r| r.round_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(row.strokes_for_round(1), Some(70));
        assert_eq!(row.round(1).and_then(|r| r.course_id.clone()), Some("540".into()));
    }

    #[test]
    fn tournament_status_flags() {
        let official = TournamentStatus::from_document(&json!({"status": "Official"}));
        assert!(official.is_official_complete && official.is_complete && !official.is_in_progress);

        let live = TournamentStatus::from_document(&json!({
            "status": "In Progress",
            "roundId": {"$numberInt": "3"},
            "cutLines": [{"cutScore": "+1", "cutCount": 70}]
        }));
        assert!(live.is_in_progress && !live.is_complete);
        assert_eq!(live.current_round, Some(3));
        assert_eq!(live.cut_score, Some(1));
    }

    #[test]
    fn document_rejects_wrong_shapes() {
        assert!(LeaderboardDocument::from_value(&json!([]), 4).is_err());
        assert!(LeaderboardDocument::from_value(&json!({"leaderboardRows": {}}), 4).is_err());
        let empty = LeaderboardDocument::from_value(&json!({"status": "Not Started"}), 4)
            .expect("empty document parses");
        assert!(empty.rows.is_empty());
    }
}
