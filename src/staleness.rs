//! Decides when a stored scoring snapshot can be served again and when the
//! leaderboard has moved on enough to recompute.

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::Value;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::ScoringPolicy;
use crate::model::{
    LeaderboardDocument, ScoringSnapshot, TeamDefinition, TeamScoreResult, TournamentStatus,
};
use crate::storage::SnapshotStore;

/// Writes `value` as JSON with object keys sorted at every level.
fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(&Value::String(key.clone()), out);
                out.push(':');
                write_canonical(&map[key.as_str()], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => {
            let _ = write!(out, "{scalar}");
        }
    }
}

#[must_use]
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

/// Digest of the raw leaderboard rows. Row order matters, key order does not.
#[must_use]
pub fn content_hash(leaderboard_rows: &[Value]) -> String {
    let mut out = String::from("[");
    for (i, row) in leaderboard_rows.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_canonical(row, &mut out);
    }
    out.push(']');
    sha256::digest(out.as_str())
}

/// Digest of what team scores depend on besides the leaderboard: the rosters
/// in order and the scoring policy.
#[must_use]
pub fn inputs_hash(teams: &[TeamDefinition], policy: &ScoringPolicy) -> String {
    let inputs = serde_json::json!({ "teams": teams, "policy": policy });
    sha256::digest(canonical_json(&inputs).as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecalcReason {
    NoSnapshot,
    StoreUnavailable,
    /// The stored scores were computed for other rosters or another policy.
    InputsChanged,
    DataChanged,
    BecameOfficial,
    /// The stored snapshot is official and the fresh payload is not: an
    /// out-of-order response that must not replace it.
    OfficialLocked,
    UpToDate,
}

impl RecalcReason {
    #[must_use]
    pub fn requires_recalculation(self) -> bool {
        matches!(
            self,
            Self::NoSnapshot
                | Self::StoreUnavailable
                | Self::InputsChanged
                | Self::DataChanged
                | Self::BecameOfficial
        )
    }
}

#[must_use]
pub fn recalc_reason(
    stored: Option<&ScoringSnapshot>,
    fresh_hash: &str,
    fresh_status: &TournamentStatus,
) -> RecalcReason {
    let Some(stored) = stored else {
        return RecalcReason::NoSnapshot;
    };
    let stored_official = stored.tournament_status.is_official_complete;
    if stored_official && !fresh_status.is_official_complete {
        RecalcReason::OfficialLocked
    } else if stored.data_hash != fresh_hash {
        RecalcReason::DataChanged
    } else if !stored_official && fresh_status.is_official_complete {
        RecalcReason::BecameOfficial
    } else {
        RecalcReason::UpToDate
    }
}

/// Like [`recalc_reason`], but a snapshot scored from other inputs is never
/// reused, official or not.
#[must_use]
pub fn recalc_reason_for_inputs(
    stored: Option<&ScoringSnapshot>,
    fresh_hash: &str,
    fresh_status: &TournamentStatus,
    fresh_inputs: &str,
) -> RecalcReason {
    match stored {
        Some(s) if s.inputs_hash != fresh_inputs => RecalcReason::InputsChanged,
        _ => recalc_reason(stored, fresh_hash, fresh_status),
    }
}

/// Wraps the external snapshot store. Store failures never surface as errors:
/// reads fail open toward recomputing, writes report `false`.
#[derive(Clone)]
pub struct StalenessController {
    store: Arc<dyn SnapshotStore>,
}

impl StalenessController {
    #[must_use]
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self { store }
    }

    pub async fn recalc_reason(
        &self,
        tournament_id: &str,
        fresh: &LeaderboardDocument,
    ) -> RecalcReason {
        self.reason(tournament_id, fresh, None).await
    }

    /// Staleness check for scores of a particular set of rosters and policy,
    /// see [`inputs_hash`].
    pub async fn recalc_reason_for_inputs(
        &self,
        tournament_id: &str,
        fresh: &LeaderboardDocument,
        fresh_inputs: &str,
    ) -> RecalcReason {
        self.reason(tournament_id, fresh, Some(fresh_inputs)).await
    }

    async fn reason(
        &self,
        tournament_id: &str,
        fresh: &LeaderboardDocument,
        fresh_inputs: Option<&str>,
    ) -> RecalcReason {
        let stored = match self.store.get_snapshot(tournament_id).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!(tournament_id, error = %e, "snapshot store read failed, recomputing");
                return RecalcReason::StoreUnavailable;
            }
        };
        let fresh_hash = content_hash(&fresh.raw_rows);
        let reason = match fresh_inputs {
            Some(inputs) => {
                recalc_reason_for_inputs(stored.as_ref(), &fresh_hash, &fresh.status, inputs)
            }
            None => recalc_reason(stored.as_ref(), &fresh_hash, &fresh.status),
        };
        debug!(tournament_id, ?reason, "staleness check");
        reason
    }

    pub async fn should_recalculate(&self, tournament_id: &str, fresh: &LeaderboardDocument) -> bool {
        self.recalc_reason(tournament_id, fresh)
            .await
            .requires_recalculation()
    }

    /// Persists a new snapshot without recording the inputs it was scored
    /// from. Returns `false` when nothing was written.
    pub async fn store(
        &self,
        tournament_id: &str,
        leaderboard_rows: &[Value],
        team_scores: &[TeamScoreResult],
        metadata: &TournamentStatus,
    ) -> bool {
        self.store_at(
            tournament_id,
            leaderboard_rows,
            team_scores,
            metadata,
            "",
            Utc::now(),
        )
        .await
        .is_some()
    }

    /// Writes a snapshot and returns it. An official snapshot on record is
    /// only ever replaced by another official one; a non-official write
    /// against it is skipped and returns `None`, as does a failed write.
    pub async fn store_at(
        &self,
        tournament_id: &str,
        leaderboard_rows: &[Value],
        team_scores: &[TeamScoreResult],
        metadata: &TournamentStatus,
        inputs_hash: &str,
        calculated_at: DateTime<Utc>,
    ) -> Option<ScoringSnapshot> {
        let stored_official = matches!(
            self.store.get_snapshot(tournament_id).await,
            Ok(Some(ref s)) if s.tournament_status.is_official_complete
        );
        if stored_official && !metadata.is_official_complete {
            debug!(
                tournament_id,
                status = %metadata.status,
                "official snapshot on record, skipping non-official write"
            );
            return None;
        }

        let snapshot = ScoringSnapshot {
            tournament_id: tournament_id.to_string(),
            data_hash: content_hash(leaderboard_rows),
            inputs_hash: inputs_hash.to_string(),
            tournament_status: metadata.clone(),
            team_scores: team_scores.to_vec(),
            calculated_at,
        };
        match self.store.put_snapshot(&snapshot).await {
            Ok(()) => {
                info!(tournament_id, hash = %snapshot.data_hash, "stored scoring snapshot");
                Some(snapshot)
            }
            Err(e) => {
                warn!(tournament_id, error = %e, "failed to persist scoring snapshot");
                None
            }
        }
    }

    /// Returns the stored snapshot if it is no older than `max_age_minutes`.
    /// Pass `i64::MAX` for no limit.
    pub async fn load(&self, tournament_id: &str, max_age_minutes: i64) -> Option<ScoringSnapshot> {
        self.load_at(tournament_id, max_age_minutes, Utc::now()).await
    }

    pub async fn load_at(
        &self,
        tournament_id: &str,
        max_age_minutes: i64,
        now: DateTime<Utc>,
    ) -> Option<ScoringSnapshot> {
        let snapshot = match self.store.get_snapshot(tournament_id).await {
            Ok(snapshot) => snapshot?,
            Err(e) => {
                warn!(tournament_id, error = %e, "snapshot store read failed");
                return None;
            }
        };
        let max_age = TimeDelta::try_minutes(max_age_minutes).unwrap_or(TimeDelta::MAX);
        if now - snapshot.calculated_at > max_age {
            debug!(
                tournament_id,
                age_minutes = snapshot.age_minutes(now),
                max_age_minutes,
                "stored snapshot too old"
            );
            return None;
        }
        Some(snapshot)
    }
}
