use std::cmp::Ordering;

use crate::model::{TeamScoreResult, TeamStanding};

fn by_total(a: &TeamScoreResult, b: &TeamScoreResult) -> Ordering {
    match (a.total_score, b.total_score) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Orders teams lowest total first. Teams without a total sink to the bottom.
/// Equal totals share a position and the next position skips ahead (1, 2, 2, 4).
#[must_use]
pub fn rank_teams(mut results: Vec<TeamScoreResult>) -> Vec<TeamStanding> {
    results.sort_by(|a, b| by_total(a, b).then_with(|| a.team_name.cmp(&b.team_name)));

    let totals: Vec<Option<i32>> = results.iter().map(|r| r.total_score).collect();
    let mut position = 0;
    results
        .into_iter()
        .enumerate()
        .map(|(i, result)| {
            if i == 0 || totals[i - 1] != result.total_score {
                position = i + 1;
            }
            let tied = totals
                .iter()
                .enumerate()
                .any(|(j, total)| j != i && *total == result.total_score);
            TeamStanding {
                position,
                tied,
                result,
            }
        })
        .collect()
}

/// Teams entered in the season-long competition.
#[must_use]
pub fn annual_teams(results: &[TeamScoreResult]) -> Vec<TeamScoreResult> {
    results
        .iter()
        .filter(|r| r.participates_in_annual)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(name: &str, total: Option<i32>, annual: bool) -> TeamScoreResult {
        TeamScoreResult {
            team_name: name.to_string(),
            total_score: total,
            players: vec![],
            valid_rounds: usize::from(total.is_some()),
            round_details: vec![],
            participates_in_annual: annual,
        }
    }

    #[test]
    fn ties_share_a_position() {
        let standings = rank_teams(vec![
            team("Delta", None, false),
            team("Bravo", Some(-4), false),
            team("Alpha", Some(-4), true),
            team("Charlie", Some(2), false),
        ]);
        let summary: Vec<(&str, usize, bool)> = standings
            .iter()
            .map(|s| (s.result.team_name.as_str(), s.position, s.tied))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Alpha", 1, true),
                ("Bravo", 1, true),
                ("Charlie", 3, false),
                ("Delta", 4, false),
            ]
        );
    }

    #[test]
    fn annual_filter_keeps_flagged_teams() {
        let teams = vec![team("A", Some(1), true), team("B", Some(2), false)];
        let annual = annual_teams(&teams);
        assert_eq!(annual.len(), 1);
        assert_eq!(annual[0].team_name, "A");
    }
}
