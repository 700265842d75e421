use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;

use crate::config::{ScoringPolicy, StalenessPolicy};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Leaderboard payload as returned by the provider (JSON object with `leaderboardRows`).
    #[arg(
        short = 'l',
        long,
        value_name = "LEADERBOARD_JSON",
        value_parser = crate::args::validation::check_readable_leaderboard
    )]
    pub leaderboard: Value,
    /// Team definitions: a JSON array of `{teamName, golferNames, participatesInAnnual}`.
    #[arg(
        short = 't',
        long,
        value_name = "TEAMS_JSON",
        value_parser = crate::args::validation::check_readable_teams
    )]
    pub teams: Value,
    /// Tournament id used as the snapshot key.
    #[arg(short = 'i', long, value_name = "TOURNAMENT_ID", default_value = "033")]
    pub tournament_id: String,
    #[arg(long, value_name = "PAR", default_value_t = crate::config::DEFAULT_PAR)]
    pub par: i32,
    #[arg(long, value_name = "ROUNDS", default_value_t = crate::config::DEFAULT_NUM_ROUNDS)]
    pub rounds: i32,
    /// How many golfer scores count per round.
    #[arg(long, value_name = "BEST_N", default_value_t = crate::config::DEFAULT_BEST_N)]
    pub best_n: usize,
    #[arg(long, value_name = "ROSTER_SIZE", default_value_t = crate::config::DEFAULT_ROSTER_SIZE)]
    pub roster_size: usize,
    /// SQLite file for scoring snapshots. Without it snapshots live in memory for this run only.
    #[arg(short = 's', long, value_name = "SNAPSHOT_DB")]
    pub store: Option<PathBuf>,
    /// Oldest snapshot, in minutes, that may be served instead of recomputing.
    #[arg(
        long,
        value_name = "MINUTES",
        default_value_t = crate::config::DEFAULT_MAX_AGE_MINUTES
    )]
    pub max_age_minutes: i64,
    /// Print teams in standings order with positions.
    #[arg(long, default_value_t = false)]
    pub standings: bool,
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub leaderboard: Value,
    pub teams: Value,
    pub tournament_id: String,
    pub policy: ScoringPolicy,
    pub staleness: StalenessPolicy,
    pub store: Option<PathBuf>,
    pub standings: bool,
}
