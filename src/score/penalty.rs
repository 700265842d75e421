use serde_json::Value;
use tracing::debug;

use crate::model::{LeaderboardRow, RoundEntry};
use crate::score::completeness::{RoundCompleteness, analyze_rounds};

/// Fills in complete rounds that eliminated players never got to play.
///
/// A synthesized round costs one stroke more than the worst real round posted
/// in it. Rounds the field has not finished, rounds with no stroke data at all
/// and rounds the player already has an entry for (real or synthesized) are
/// left alone. Returns how many rounds were synthesized.
pub fn assign_cut_penalties(rows: &mut [LeaderboardRow], completeness: &RoundCompleteness) -> usize {
    let mut synthesized = 0;

    for row in rows.iter_mut().filter(|r| r.is_eliminated()) {
        let mut added = false;
        for state in completeness.iter().filter(|s| s.complete) {
            if row.round(state.round_id).is_some() {
                continue;
            }
            let Some(max_strokes) = state.max_strokes else {
                continue;
            };

            let course = row
                .rounds
                .iter()
                .find(|r| !r.is_penalty && (r.course_id.is_some() || r.course_name.is_some()));
            let entry = RoundEntry {
                round_id: state.round_id,
                strokes: Some(max_strokes + 1),
                score_to_par: state.max_strokes_score_to_par.map(|p| p + 1),
                is_penalty: true,
                course_id: course.and_then(|c| c.course_id.clone()),
                course_name: course.and_then(|c| c.course_name.clone()),
            };
            debug!(
                player = %row.name(),
                round = state.round_id,
                strokes = max_strokes + 1,
                "synthesized cut penalty round"
            );
            row.rounds.push(entry);
            added = true;
            synthesized += 1;
        }

        if added {
            row.rounds.sort_by_key(|r| r.round_id);
            row.recompute_total_strokes();
        }
    }

    synthesized
}

/// Analyzes an already normalized field and applies cut penalties to it.
pub fn penalize_rows(rows: &mut [LeaderboardRow], num_rounds: i32) -> usize {
    let completeness = analyze_rounds(rows, num_rounds);
    assign_cut_penalties(rows, &completeness)
}

/// Normalizes raw provider rows and applies cut penalties.
#[must_use]
pub fn normalize_and_penalize(raw_rows: &[Value], num_rounds: i32) -> Vec<LeaderboardRow> {
    let mut rows: Vec<LeaderboardRow> = raw_rows
        .iter()
        .map(|row| LeaderboardRow::from_value(row, num_rounds))
        .collect();
    let synthesized = penalize_rows(&mut rows, num_rounds);
    debug!(players = rows.len(), synthesized, "normalized leaderboard");
    rows
}
