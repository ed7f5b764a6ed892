//! Session Record Persistence
//!
//! Information Hiding:
//! - Durable storage location and format hidden behind trait
//! - Allows swapping between memory and filesystem backends without API changes
//! - Each backend encapsulates its own serialization and failure details
//!
//! The durable surface is a single fixed slot holding the whole record
//! collection: `save` overwrites it in full, `load` reads it once at startup.

use crate::session::types::SessionRecord;
use anyhow::Result;
use async_trait::async_trait;

pub mod filesystem;
pub mod memory;

/// Trait defining the session record persistence interface
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Overwrite the stored collection with `records`
    async fn save(&self, records: &[SessionRecord]) -> Result<()>;

    /// Read the stored collection
    /// Returns an empty vector if nothing has been stored yet
    async fn load(&self) -> Result<Vec<SessionRecord>>;
}
