#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use rusty_golf_teams::model::{ScoringSnapshot, TeamDefinition};
use rusty_golf_teams::staleness::StalenessController;
use rusty_golf_teams::storage::{InMemorySnapshotStore, SnapshotStore, StorageError};

pub const TOURNAMENT_ID: &str = "033";

pub fn leaderboard_fixture() -> Value {
    serde_json::from_str(include_str!("../test_data/leaderboard_round4.json"))
        .expect("leaderboard fixture is valid json")
}

pub fn teams_fixture() -> Vec<TeamDefinition> {
    serde_json::from_str(include_str!("../test_data/teams.json")).expect("teams fixture is valid json")
}

/// The fixture with the tournament marked official.
pub fn official_fixture() -> Value {
    let mut doc = leaderboard_fixture();
    doc["status"] = Value::String("Official".to_string());
    doc["roundStatus"] = Value::String("Official".to_string());
    doc
}

/// The fixture after Xander Schauffele posts a round 4.
pub fn updated_fixture() -> Value {
    let mut doc = leaderboard_fixture();
    let rows = doc["leaderboardRows"]
        .as_array_mut()
        .expect("leaderboardRows is an array");
    let xander = rows
        .iter_mut()
        .find(|r| r["lastName"] == "Schauffele")
        .expect("Schauffele on the fixture");
    xander["rounds"]
        .as_array_mut()
        .expect("rounds is an array")
        .push(serde_json::json!({"roundId": 4, "strokes": 68, "scoreToPar": "-3"}));
    doc
}

pub fn memory_controller() -> (InMemorySnapshotStore, StalenessController) {
    let store = InMemorySnapshotStore::new();
    let controller = StalenessController::new(Arc::new(store.clone()));
    (store, controller)
}

/// A store whose every call fails, as if the database were unreachable.
pub struct FailingStore;

#[async_trait]
impl SnapshotStore for FailingStore {
    async fn get_snapshot(
        &self,
        _tournament_id: &str,
    ) -> Result<Option<ScoringSnapshot>, StorageError> {
        Err(StorageError::new("connection refused"))
    }

    async fn put_snapshot(&self, _snapshot: &ScoringSnapshot) -> Result<(), StorageError> {
        Err(StorageError::new("connection refused"))
    }
}

pub fn failing_controller() -> StalenessController {
    StalenessController::new(Arc::new(FailingStore))
}
