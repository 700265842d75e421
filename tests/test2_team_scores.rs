mod common;

use serde_json::json;

use rusty_golf_teams::config::ScoringPolicy;
use rusty_golf_teams::model::{
    LeaderboardDocument, LeaderboardRow, MISSING_STATUS, TeamDefinition, TeamScoreResult,
};
use rusty_golf_teams::score::{
    annual_teams, compute_team_scores, compute_team_scores_with_policy, penalize_rows, rank_teams,
};

fn scored_fixture() -> Vec<TeamScoreResult> {
    let doc = LeaderboardDocument::from_value(&common::leaderboard_fixture(), 4)
        .expect("fixture parses");
    let mut rows = doc.rows;
    penalize_rows(&mut rows, 4);
    compute_team_scores(&rows, &common::teams_fixture(), 71)
}

fn team<'a>(results: &'a [TeamScoreResult], name: &str) -> &'a TeamScoreResult {
    results
        .iter()
        .find(|t| t.team_name == name)
        .expect("team scored")
}

#[test]
fn test2_best_three_of_four_per_round() {
    let results = scored_fixture();
    let birdies = team(&results, "Birdie Hunters");

    let per_round: Vec<Option<i32>> = birdies.round_details.iter().map(|d| d.score).collect();
    assert_eq!(per_round, vec![Some(-6), Some(-3), Some(4), None]);
    assert_eq!(birdies.total_score, Some(-5));
    assert_eq!(birdies.valid_rounds, 3);

    // round 3 counts Scheffler -1, Schauffele +1, McIlroy +4; Woods' penalty is dropped
    assert_eq!(birdies.round_details[2].penalty_count, 0);
    assert_eq!(birdies.round_details[3].valid_count, 2);
}

#[test]
fn test2_live_scores_fill_the_current_round() {
    let results = scored_fixture();
    let birdies = team(&results, "Birdie Hunters");

    let scheffler = &birdies.players[0];
    let round4 = scheffler.round_score(4).expect("round 4 slot");
    assert!(round4.is_live);
    assert_eq!(round4.score, Some(-2));
    assert_eq!(round4.strokes, None);

    // "-" means McIlroy has not teed off
    let mcilroy = &birdies.players[1];
    assert_eq!(mcilroy.round_score(4).and_then(|r| r.score), None);

    let xander = &birdies.players[3];
    assert_eq!(xander.round_score(4).and_then(|r| r.score), Some(0));
}

#[test]
fn test2_missing_golfer_and_penalties() {
    let results = scored_fixture();
    let bogeys = team(&results, "Bogey Train");

    let ghost = &bogeys.players[2];
    assert_eq!(ghost.status, MISSING_STATUS);
    assert_eq!(ghost.total, None);
    assert_eq!(ghost.rounds.len(), 4);
    assert!(ghost.rounds.iter().all(|r| r.score.is_none()));

    // roster names match regardless of case and spacing
    assert_eq!(bogeys.players[0].name, "Jon Rahm");
    assert_eq!(bogeys.players[3].name, "Tiger Woods");

    let per_round: Vec<Option<i32>> = bogeys.round_details.iter().map(|d| d.score).collect();
    assert_eq!(per_round, vec![Some(2), Some(2), Some(12), None]);
    assert_eq!(bogeys.round_details[1].penalty_count, 1);
    assert_eq!(bogeys.round_details[2].penalty_count, 2);
    assert_eq!(bogeys.total_score, Some(16));
}

#[test]
fn test2_every_cut_player_shares_one_baseline() {
    let results = scored_fixture();
    let cut: Vec<_> = results
        .iter()
        .flat_map(|t| t.players.iter())
        .filter(|p| p.is_cut)
        .collect();
    assert_eq!(cut.len(), 3);
    // worst competing total is McIlroy's +3
    assert!(cut.iter().all(|p| p.total == Some(4)));

    let woods = cut
        .iter()
        .find(|p| p.name == "Tiger Woods")
        .expect("Woods is cut");
    assert_eq!(woods.source_total, Some(0));
}

#[test]
fn test2_team_without_any_full_round_has_no_total() {
    let rows: Vec<LeaderboardRow> = [
        json!({"firstName": "A", "lastName": "One", "status": "active",
               "rounds": [{"roundId": 1, "strokes": 72}]}),
        json!({"firstName": "B", "lastName": "Two", "status": "active",
               "rounds": [{"roundId": 1, "strokes": 74}]}),
    ]
    .iter()
    .map(|v| LeaderboardRow::from_value(v, 4))
    .collect();
    let teams = vec![TeamDefinition {
        team_name: "Short Handed".into(),
        golfer_names: vec!["A One".into(), "B Two".into()],
        participates_in_annual: true,
    }];

    let results = compute_team_scores(&rows, &teams, 71);
    assert_eq!(results[0].total_score, None);
    assert_eq!(results[0].valid_rounds, 0);
    assert_eq!(results[0].round_details[0].valid_count, 2);

    // a best-2 policy counts the same round
    let policy = ScoringPolicy {
        best_n: 2,
        roster_size: 2,
        ..ScoringPolicy::default()
    };
    let results = compute_team_scores_with_policy(&rows, &teams, &policy);
    assert_eq!(results[0].total_score, Some(4));
}

#[test]
fn test2_standings_and_annual() {
    let results = scored_fixture();
    let standings = rank_teams(results.clone());
    assert_eq!(standings[0].result.team_name, "Birdie Hunters");
    assert_eq!(standings[0].position, 1);
    assert_eq!(standings[1].position, 2);
    assert!(!standings[0].tied);

    let annual = annual_teams(&results);
    assert_eq!(annual.len(), 1);
    assert_eq!(annual[0].team_name, "Birdie Hunters");
}
