//! In-Memory Session Record Storage
//!
//! Information Hiding:
//! - Backing vector hidden from users
//! - Thread-safe access via RwLock hidden behind async interface
//! - Suitable for tests and the ephemeral chat mode

use super::SessionStorage;
use crate::session::types::SessionRecord;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-memory storage holding the one record collection
/// Data is lost when the process terminates
pub struct InMemoryStorage {
    records: RwLock<Vec<SessionRecord>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStorage for InMemoryStorage {
    async fn save(&self, records: &[SessionRecord]) -> Result<()> {
        let mut slot = self.records.write().await;
        *slot = records.to_vec();
        tracing::debug!("[InMemoryStorage] Saved {} records", records.len());
        Ok(())
    }

    async fn load(&self) -> Result<Vec<SessionRecord>> {
        let slot = self.records.read().await;
        tracing::debug!("[InMemoryStorage] Loaded {} records", slot.len());
        Ok(slot.clone())
    }
}
