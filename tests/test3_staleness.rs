mod common;

use chrono::{TimeDelta, Utc};

use rusty_golf_teams::model::{LeaderboardDocument, TeamScoreResult, TournamentStatus};
use rusty_golf_teams::staleness::RecalcReason;
use rusty_golf_teams::storage::SnapshotStore;

use common::TOURNAMENT_ID;

fn doc(value: &serde_json::Value) -> LeaderboardDocument {
    LeaderboardDocument::from_value(value, 4).expect("fixture parses")
}

#[tokio::test]
async fn test3_recalculates_only_when_rows_change() -> Result<(), Box<dyn std::error::Error>> {
    let (_store, controller) = common::memory_controller();
    let fresh = doc(&common::leaderboard_fixture());

    assert!(controller.should_recalculate(TOURNAMENT_ID, &fresh).await);
    assert!(
        controller
            .store(TOURNAMENT_ID, &fresh.raw_rows, &[], &fresh.status)
            .await
    );
    assert!(!controller.should_recalculate(TOURNAMENT_ID, &fresh).await);

    // the same payload fetched again, with keys in another order
    let text = serde_json::to_string_pretty(&common::leaderboard_fixture())?;
    let refetched = doc(&serde_json::from_str(&text)?);
    assert_eq!(
        controller.recalc_reason(TOURNAMENT_ID, &refetched).await,
        RecalcReason::UpToDate
    );

    let updated = doc(&common::updated_fixture());
    assert_eq!(
        controller.recalc_reason(TOURNAMENT_ID, &updated).await,
        RecalcReason::DataChanged
    );

    // rows in a different order count as a change
    let mut reordered = fresh.clone();
    reordered.raw_rows.reverse();
    assert!(controller.should_recalculate(TOURNAMENT_ID, &reordered).await);
    Ok(())
}

#[tokio::test]
async fn test3_official_is_one_way() {
    let (store, controller) = common::memory_controller();
    let live = doc(&common::leaderboard_fixture());
    let official = doc(&common::official_fixture());
    assert!(official.status.is_official_complete);

    assert!(controller.store(TOURNAMENT_ID, &live.raw_rows, &[], &live.status).await);
    assert_eq!(
        controller.recalc_reason(TOURNAMENT_ID, &official).await,
        RecalcReason::BecameOfficial
    );
    let official_scores = vec![TeamScoreResult {
        team_name: "Birdie Hunters".to_string(),
        total_score: Some(-5),
        players: vec![],
        valid_rounds: 3,
        round_details: vec![],
        participates_in_annual: true,
    }];
    assert!(
        controller
            .store(TOURNAMENT_ID, &official.raw_rows, &official_scores, &official.status)
            .await
    );
    let official_snapshot = store
        .get_snapshot(TOURNAMENT_ID)
        .await
        .expect("in-memory store never fails")
        .expect("snapshot stored");

    // a late, stale response must not pull the result back
    let late = doc(&common::updated_fixture());
    assert!(!late.status.is_official_complete);
    assert_eq!(
        controller.recalc_reason(TOURNAMENT_ID, &late).await,
        RecalcReason::OfficialLocked
    );
    assert!(!controller.should_recalculate(TOURNAMENT_ID, &late).await);

    // a direct write of the late data is refused and the official result stays
    assert!(!controller.store(TOURNAMENT_ID, &late.raw_rows, &[], &late.status).await);
    let stored = store
        .get_snapshot(TOURNAMENT_ID)
        .await
        .expect("in-memory store never fails")
        .expect("snapshot stored");
    assert_eq!(stored, official_snapshot);
    assert_eq!(stored.tournament_status.status, "Official");
    assert_eq!(stored.team_scores, official_scores);

    // a corrected official payload may still replace it
    let corrected = doc(&{
        let mut value = common::updated_fixture();
        value["status"] = serde_json::Value::String("Official".to_string());
        value
    });
    assert!(
        controller
            .store(TOURNAMENT_ID, &corrected.raw_rows, &[], &corrected.status)
            .await
    );
}

#[tokio::test]
async fn test3_load_honours_max_age() {
    let (_store, controller) = common::memory_controller();
    let fresh = doc(&common::leaderboard_fixture());
    let now = Utc::now();

    let written = controller
        .store_at(
            TOURNAMENT_ID,
            &fresh.raw_rows,
            &[],
            &fresh.status,
            "",
            now - TimeDelta::minutes(61),
        )
        .await
        .expect("snapshot written");

    assert!(controller.load_at(TOURNAMENT_ID, 60, now).await.is_none());
    assert_eq!(
        controller.load_at(TOURNAMENT_ID, 90, now).await,
        Some(written.clone())
    );
    assert_eq!(controller.load(TOURNAMENT_ID, i64::MAX).await, Some(written));
    assert!(controller.load("999", i64::MAX).await.is_none());
}

#[tokio::test]
async fn test3_unreachable_store_fails_open() {
    let controller = common::failing_controller();
    let fresh = doc(&common::leaderboard_fixture());

    assert_eq!(
        controller.recalc_reason(TOURNAMENT_ID, &fresh).await,
        RecalcReason::StoreUnavailable
    );
    assert!(controller.should_recalculate(TOURNAMENT_ID, &fresh).await);
    assert!(
        !controller
            .store(TOURNAMENT_ID, &fresh.raw_rows, &[], &TournamentStatus::default())
            .await
    );
    assert!(controller.load(TOURNAMENT_ID, i64::MAX).await.is_none());
}
