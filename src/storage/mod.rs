pub mod memory;
pub mod sqlite;

pub use memory::InMemorySnapshotStore;
pub use sqlite::SqliteSnapshotStore;

use async_trait::async_trait;
use std::error::Error;
use std::fmt;

use crate::model::ScoringSnapshot;

#[derive(Debug, Clone)]
pub struct StorageError {
    message: String,
}

impl StorageError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for StorageError {}

impl From<String> for StorageError {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for StorageError {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::new(format!("sqlite: {err}"))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("snapshot payload: {err}"))
    }
}

/// Document store holding the latest scoring snapshot per tournament.
///
/// Writes are last-write-wins; callers do not get a compare-and-swap.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn get_snapshot(
        &self,
        tournament_id: &str,
    ) -> Result<Option<ScoringSnapshot>, StorageError>;

    async fn put_snapshot(&self, snapshot: &ScoringSnapshot) -> Result<(), StorageError>;
}
