use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::{SnapshotStore, StorageError};
use crate::model::ScoringSnapshot;

const SCHEMA: &str = include_str!("../sql/schema/sqlite/00_scoring_snapshot.sql");
const GET_SNAPSHOT: &str = include_str!("../sql/functions/sqlite/01_get_snapshot.sql");
const SET_SNAPSHOT: &str = include_str!("../sql/functions/sqlite/02_set_snapshot.sql");

/// Snapshot store backed by a single SQLite table. The snapshot itself is kept
/// as a JSON payload; the hash and official flag are copied into columns for
/// ad hoc inspection.
#[derive(Clone)]
pub struct SqliteSnapshotStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSnapshotStore {
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema cannot
    /// be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::from_connection(Connection::open(path)?)
    }

    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_connection<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, StorageError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|e| StorageError::new(format!("sqlite connection poisoned: {e}")))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| StorageError::new(format!("sqlite task failed: {e}")))?
    }
}

#[async_trait]
impl SnapshotStore for SqliteSnapshotStore {
    async fn get_snapshot(
        &self,
        tournament_id: &str,
    ) -> Result<Option<ScoringSnapshot>, StorageError> {
        let tournament_id = tournament_id.to_string();
        self.with_connection(move |conn| {
            let payload: Option<String> = conn
                .query_row(GET_SNAPSHOT, params![tournament_id], |row| row.get(0))
                .optional()?;
            payload
                .map(|p| serde_json::from_str::<ScoringSnapshot>(&p))
                .transpose()
                .map_err(StorageError::from)
        })
        .await
    }

    async fn put_snapshot(&self, snapshot: &ScoringSnapshot) -> Result<(), StorageError> {
        let payload = serde_json::to_string(snapshot)?;
        let snapshot = snapshot.clone();
        self.with_connection(move |conn| {
            let tx = conn.transaction()?;
            tx.execute(
                SET_SNAPSHOT,
                params![
                    snapshot.tournament_id,
                    snapshot.data_hash,
                    snapshot.tournament_status.is_official_complete,
                    payload,
                    snapshot.calculated_at.to_rfc3339(),
                ],
            )?;
            tx.commit()?;
            Ok(())
        })
        .await
    }
}
