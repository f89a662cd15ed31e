use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Where the store snapshots its state between sessions.
///
/// Snapshots are exchanged as raw JSON so the store can merge a partial
/// snapshot over its defaults before decoding it.
#[async_trait]
pub trait StateRepository: Send + Sync {
    async fn load(&self) -> Result<Option<Value>>;
    async fn save(&self, snapshot: Value) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

pub type StateRepositoryBox = Box<dyn StateRepository>;
