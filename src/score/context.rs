use chrono::Utc;
use serde_json::Value;
use tracing::info;

use crate::config::{ScoringPolicy, StalenessPolicy};
use crate::error::CoreError;
use crate::model::{
    LeaderboardDocument, ScoringOutcome, ScoringSnapshot, TeamDefinition, format_time_ago,
};
use crate::score::penalty::penalize_rows;
use crate::score::score_aggregators::compute_team_scores_with_policy;
use crate::staleness::{RecalcReason, StalenessController, inputs_hash};

fn outcome_from_snapshot(snapshot: ScoringSnapshot, reused: bool, persisted: bool) -> ScoringOutcome {
    let elapsed = Utc::now() - snapshot.calculated_at;
    ScoringOutcome {
        team_scores: snapshot.team_scores,
        tournament_status: snapshot.tournament_status,
        reused_snapshot: reused,
        persisted,
        calculated_at: snapshot.calculated_at,
        last_refresh: format_time_ago(elapsed),
    }
}

/// Scores a freshly fetched leaderboard for a set of teams, reusing the stored
/// snapshot when nothing relevant has changed.
///
/// A snapshot is only reused when it was scored for the same rosters and
/// policy. An official snapshot is then served regardless of age. A skipped or
/// failed write still returns the computed scores, with `persisted` set to
/// `false`.
///
/// # Errors
///
/// Returns an error only when the leaderboard payload is not a usable document.
pub async fn score_tournament(
    controller: &StalenessController,
    tournament_id: &str,
    leaderboard: &Value,
    teams: &[TeamDefinition],
    policy: &ScoringPolicy,
    staleness: &StalenessPolicy,
) -> Result<ScoringOutcome, CoreError> {
    let doc = LeaderboardDocument::from_value(leaderboard, policy.num_rounds)?;
    let inputs = inputs_hash(teams, policy);
    let reason = controller
        .recalc_reason_for_inputs(tournament_id, &doc, &inputs)
        .await;

    if !reason.requires_recalculation() {
        let max_age = if reason == RecalcReason::OfficialLocked || doc.status.is_official_complete
        {
            i64::MAX
        } else {
            staleness.max_age_minutes
        };
        let stored = controller
            .load(tournament_id, max_age)
            .await
            .filter(|s| s.inputs_hash == inputs);
        if let Some(snapshot) = stored {
            info!(tournament_id, ?reason, "serving stored scoring snapshot");
            return Ok(outcome_from_snapshot(snapshot, true, true));
        }
        info!(tournament_id, "stored snapshot expired, recomputing");
    }

    let mut rows = doc.rows.clone();
    penalize_rows(&mut rows, policy.num_rounds);
    let team_scores = compute_team_scores_with_policy(&rows, teams, policy);
    let calculated_at = Utc::now();

    let stored = controller
        .store_at(
            tournament_id,
            &doc.raw_rows,
            &team_scores,
            &doc.status,
            &inputs,
            calculated_at,
        )
        .await;

    Ok(match stored {
        Some(snapshot) => outcome_from_snapshot(snapshot, false, true),
        None => ScoringOutcome {
            team_scores,
            tournament_status: doc.status,
            reused_snapshot: false,
            persisted: false,
            calculated_at,
            last_refresh: format_time_ago(Utc::now() - calculated_at),
        },
    })
}
