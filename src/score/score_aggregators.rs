use ahash::RandomState;
use std::collections::HashMap;
use tracing::debug;

use crate::config::ScoringPolicy;
use crate::model::{
    LeaderboardRow, PlayerRoundScore, ProcessedPlayer, RoundDetail, TeamDefinition,
    TeamScoreResult,
};

/// Lowercased, trimmed, inner whitespace collapsed.
#[must_use]
pub fn name_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// The total handed to every eliminated player in one aggregation: one worse
/// than the worst known total among players still competing.
#[must_use]
pub fn cut_baseline(rows: &[LeaderboardRow], fallback: i32) -> i32 {
    rows.iter()
        .filter(|r| !r.is_eliminated())
        .filter_map(|r| r.total)
        .max()
        .map_or(fallback, |worst| worst + 1)
}

/// Sums the `n` lowest scores. Each score carries whether it was a synthesized
/// penalty. Returns the sum and how many penalties it counted, or `None` when
/// fewer than `n` scores are available.
#[must_use]
pub fn best_n_sum(scores: &[(i32, bool)], n: usize) -> Option<(i32, usize)> {
    if n == 0 || scores.len() < n {
        return None;
    }
    let mut sorted = scores.to_vec();
    sorted.sort_unstable();
    let best = &sorted[..n];
    Some((
        best.iter().map(|(score, _)| score).sum(),
        best.iter().filter(|(_, penalty)| *penalty).count(),
    ))
}

fn process_player(
    row: &LeaderboardRow,
    policy: &ScoringPolicy,
    baseline: i32,
) -> ProcessedPlayer {
    let rounds = (1..=policy.num_rounds)
        .map(|round_id| {
            let entry = row.round(round_id);
            match entry.and_then(|e| e.strokes.map(|s| (s, e.is_penalty))) {
                Some((strokes, is_penalty)) => PlayerRoundScore {
                    round_id,
                    score: Some(strokes - policy.par),
                    strokes: Some(strokes),
                    is_live: false,
                    is_penalty,
                },
                None => {
                    let live = row
                        .current_round_score
                        .filter(|_| row.current_round == Some(round_id));
                    PlayerRoundScore {
                        round_id,
                        score: live,
                        strokes: None,
                        is_live: live.is_some(),
                        is_penalty: false,
                    }
                }
            }
        })
        .collect();

    let is_cut = row.is_eliminated();
    ProcessedPlayer {
        name: row.name(),
        status: row.status.clone(),
        is_cut,
        total: if is_cut { Some(baseline) } else { row.total },
        source_total: row.total,
        position: row.position.clone(),
        thru: row.thru.clone(),
        current_round: row.current_round,
        rounds,
    }
}

fn score_team(
    team: &TeamDefinition,
    index: &HashMap<String, &LeaderboardRow, RandomState>,
    policy: &ScoringPolicy,
    baseline: i32,
) -> TeamScoreResult {
    if team.golfer_names.len() != policy.roster_size {
        debug!(
            team = %team.team_name,
            golfers = team.golfer_names.len(),
            roster_size = policy.roster_size,
            "roster size differs from policy"
        );
    }

    let players: Vec<ProcessedPlayer> = team
        .golfer_names
        .iter()
        .map(|golfer| match index.get(&name_key(golfer)) {
            Some(row) => process_player(row, policy, baseline),
            None => {
                debug!(team = %team.team_name, golfer = %golfer, "golfer not on leaderboard");
                ProcessedPlayer::missing(golfer, policy.num_rounds)
            }
        })
        .collect();

    let round_details: Vec<RoundDetail> = (1..=policy.num_rounds)
        .map(|round_id| {
            let scores: Vec<(i32, bool)> = players
                .iter()
                .filter_map(|p| p.round_score(round_id))
                .filter_map(|r| r.score.map(|s| (s, r.is_penalty)))
                .collect();
            let best = best_n_sum(&scores, policy.best_n);
            RoundDetail {
                round_id,
                score: best.map(|(sum, _)| sum),
                penalty_count: best.map_or(0, |(_, penalties)| penalties),
                valid_count: scores.len(),
            }
        })
        .collect();

    let counted: Vec<i32> = round_details.iter().filter_map(|d| d.score).collect();
    TeamScoreResult {
        team_name: team.team_name.clone(),
        total_score: (!counted.is_empty()).then(|| counted.iter().sum()),
        players,
        valid_rounds: counted.len(),
        round_details,
        participates_in_annual: team.participates_in_annual,
    }
}

/// Scores every team against normalized, penalized rows using the default
/// best-3-of-4 policy at the given par.
#[must_use]
pub fn compute_team_scores(
    rows: &[LeaderboardRow],
    teams: &[TeamDefinition],
    par: i32,
) -> Vec<TeamScoreResult> {
    let policy = ScoringPolicy {
        par,
        ..ScoringPolicy::default()
    };
    compute_team_scores_with_policy(rows, teams, &policy)
}

#[must_use]
pub fn compute_team_scores_with_policy(
    rows: &[LeaderboardRow],
    teams: &[TeamDefinition],
    policy: &ScoringPolicy,
) -> Vec<TeamScoreResult> {
    let mut index: HashMap<String, &LeaderboardRow, RandomState> =
        HashMap::with_capacity_and_hasher(rows.len(), RandomState::new());
    for row in rows {
        let key = name_key(&row.name());
        if !key.is_empty() {
            index.entry(key).or_insert(row);
        }
    }

    let baseline = cut_baseline(rows, policy.cut_fallback_total);
    teams
        .iter()
        .map(|team| score_team(team, &index, policy, baseline))
        .collect()
}
