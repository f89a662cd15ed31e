use crate::domain::ports::StateRepository;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Keeps the snapshot in process memory.
///
/// `Clone` shares the slot, so a test can hold one handle and inspect what
/// the store saved through another.
#[derive(Default, Clone)]
pub struct InMemoryStateRepository {
    snapshot: Arc<RwLock<Option<Value>>>,
}

impl InMemoryStateRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a snapshot already saved.
    pub fn with_snapshot(snapshot: Value) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(Some(snapshot))),
        }
    }
}

#[async_trait]
impl StateRepository for InMemoryStateRepository {
    async fn load(&self) -> Result<Option<Value>> {
        let snapshot = self.snapshot.read().await;
        Ok(snapshot.clone())
    }

    async fn save(&self, snapshot: Value) -> Result<()> {
        let mut slot = self.snapshot.write().await;
        *slot = Some(snapshot);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut slot = self.snapshot.write().await;
        *slot = None;
        Ok(())
    }
}
