//! Relay state shared across request handlers.

use std::sync::Arc;

use crate::core::llm::CompletionClient;

/// Shared relay state.
///
/// The relay keeps no conversation state; the completion client is its only
/// resource and every request carries its own full conversation.
pub struct RelayState {
    /// Upstream completion API client.
    pub completion: CompletionClient,
}

impl RelayState {
    pub fn new(completion: CompletionClient) -> Arc<Self> {
        Arc::new(Self { completion })
    }
}
