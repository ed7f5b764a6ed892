//! Session Store - Active Conversation with Persisted History
//!
//! Information Hiding:
//! - Persistence backend hidden behind the SessionStorage trait
//! - Relay wire protocol hidden inside RelayClient
//! - Records exposed read-only; only the active conversation mutates

use crate::core::relay::RelayClient;
use crate::session::types::{SessionRecord, Turn};
use crate::storage::SessionStorage;
use anyhow::Result;
use std::sync::Arc;

/// Client-resident chat state: the mutable active conversation plus the
/// ordered, append-only collection of completed session records.
///
/// The store owns both exclusively; durable storage is a passive mirror
/// written in full after each successful exchange and read once at
/// construction.
pub struct SessionStore {
    active: Vec<Turn>,
    records: Vec<SessionRecord>,
    relay: RelayClient,
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    /// Create a store, restoring the persisted record collection.
    ///
    /// A missing or unreadable collection degrades to an empty one with a
    /// diagnostic; construction never fails on account of storage.
    pub async fn new(relay: RelayClient, storage: Arc<dyn SessionStorage>) -> Self {
        let records = match storage.load().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("[SessionStore] Failed to restore session records: {:#}", e);
                Vec::new()
            }
        };

        Self {
            active: Vec::new(),
            records,
            relay,
            storage,
        }
    }

    /// Append a user turn to the active conversation.
    ///
    /// Returns `false` without touching the conversation when `text` trims
    /// to empty; the turn otherwise stores the text exactly as given.
    pub fn append_user_turn(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.active.push(Turn::user(text));
        true
    }

    /// Send the active conversation through the relay and fold the reply in.
    ///
    /// On success the assistant turn joins the active conversation, one new
    /// record snapshots the full updated conversation, and the whole record
    /// collection is mirrored to storage (a write failure degrades to
    /// in-memory-only with a diagnostic). On relay failure nothing is
    /// appended anywhere: the pending user turn stays, no record is created,
    /// and the error is the caller's to surface.
    ///
    /// The active conversation must end with a user turn at call time; the
    /// interactive flow guarantees this by gating submission on
    /// [`append_user_turn`](Self::append_user_turn).
    pub async fn submit_exchange(&mut self) -> Result<Turn> {
        let reply = self.relay.send(&self.active).await?;

        self.active.push(reply.clone());
        self.records.push(SessionRecord::new(self.active.clone()));

        if let Err(e) = self.storage.save(&self.records).await {
            tracing::warn!("[SessionStore] Failed to persist session records: {:#}", e);
        }

        tracing::debug!(
            "[SessionStore] Exchange complete: {} turns active, {} records",
            self.active.len(),
            self.records.len()
        );
        Ok(reply)
    }

    /// Replace the active conversation with a copy of a stored record.
    ///
    /// The record itself is immutable history: later appends only ever touch
    /// the copy. Returns `false` for an out-of-range index.
    pub fn select_record(&mut self, index: usize) -> bool {
        match self.records.get(index) {
            Some(record) => {
                self.active = record.turns.clone();
                true
            }
            None => false,
        }
    }

    /// Start a fresh conversation. The record collection is untouched.
    pub fn start_new(&mut self) {
        self.active.clear();
    }

    pub fn active(&self) -> &[Turn] {
        &self.active
    }

    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }
}
