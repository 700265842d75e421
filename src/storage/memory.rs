use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{SnapshotStore, StorageError};
use crate::model::ScoringSnapshot;

pub type SnapshotMap = Arc<RwLock<HashMap<String, ScoringSnapshot>>>;

/// Process-local store, shared by cloning.
#[derive(Clone, Default)]
pub struct InMemorySnapshotStore {
    snapshots: SnapshotMap,
}

impl InMemorySnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.snapshots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.snapshots.read().await.is_empty()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn get_snapshot(
        &self,
        tournament_id: &str,
    ) -> Result<Option<ScoringSnapshot>, StorageError> {
        Ok(self.snapshots.read().await.get(tournament_id).cloned())
    }

    async fn put_snapshot(&self, snapshot: &ScoringSnapshot) -> Result<(), StorageError> {
        self.snapshots
            .write()
            .await
            .insert(snapshot.tournament_id.clone(), snapshot.clone());
        Ok(())
    }
}
