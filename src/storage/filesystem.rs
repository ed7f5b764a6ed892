//! File-Backed Session Record Storage
//!
//! Information Hiding:
//! - File path and JSON layout hidden from users
//! - Missing-file handling hidden behind the load contract
//! - Persistence mechanism independent of storage trait users

use super::SessionStorage;
use crate::session::types::SessionRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

/// File system storage - the whole record collection lives in one JSON file,
/// the durable analog of a single fixed key. Every save rewrites the file.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl SessionStorage for FileStorage {
    async fn save(&self, records: &[SessionRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .context("Failed to create storage directory")?;
            }
        }

        let json = serde_json::to_string_pretty(records)
            .context("Failed to serialize session records")?;

        fs::write(&self.path, json)
            .await
            .context(format!("Failed to write session file: {:?}", self.path))?;

        tracing::debug!(
            "[FileStorage] Saved {} records to {:?}",
            records.len(),
            self.path
        );
        Ok(())
    }

    async fn load(&self) -> Result<Vec<SessionRecord>> {
        if !self.path.exists() {
            tracing::debug!("[FileStorage] No session file at {:?}", self.path);
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&self.path)
            .await
            .context(format!("Failed to read session file: {:?}", self.path))?;

        let records: Vec<SessionRecord> =
            serde_json::from_str(&json).context("Failed to deserialize session records")?;

        tracing::debug!(
            "[FileStorage] Loaded {} records from {:?}",
            records.len(),
            self.path
        );
        Ok(records)
    }
}
