use rusty_golf_teams::args;
use rusty_golf_teams::error::CoreError;
use rusty_golf_teams::model::TeamDefinition;
use rusty_golf_teams::score::{annual_teams, rank_teams, score_tournament};
use rusty_golf_teams::staleness::StalenessController;
use rusty_golf_teams::storage::{InMemorySnapshotStore, SnapshotStore, SqliteSnapshotStore};

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = args::args_checks();

    let teams: Vec<TeamDefinition> =
        serde_json::from_value(args.teams.clone()).map_err(CoreError::from)?;

    let store: Arc<dyn SnapshotStore> = match &args.store {
        Some(path) => Arc::new(SqliteSnapshotStore::open(path)?),
        None => Arc::new(InMemorySnapshotStore::new()),
    };
    let controller = StalenessController::new(store);

    let outcome = score_tournament(
        &controller,
        &args.tournament_id,
        &args.leaderboard,
        &teams,
        &args.policy,
        &args.staleness,
    )
    .await?;
    info!(
        tournament_id = %args.tournament_id,
        teams = outcome.team_scores.len(),
        reused = outcome.reused_snapshot,
        persisted = outcome.persisted,
        "scoring finished"
    );

    if args.standings {
        let annual = annual_teams(&outcome.team_scores);
        let report = serde_json::json!({
            "standings": rank_teams(outcome.team_scores.clone()),
            "annual": rank_teams(annual),
            "tournamentStatus": outcome.tournament_status,
            "lastRefresh": outcome.last_refresh,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }
    Ok(())
}
