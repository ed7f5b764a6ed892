use crate::relay::ChatRequest;
use crate::session::types::Turn;
use anyhow::{Context, Result};
use reqwest::Client;

/// Client-side caller for the relay's `POST /api/chat` wire contract.
///
/// Failure causes are indistinguishable here: the relay collapses malformed
/// requests and upstream faults into one generic error shape, so this client
/// surfaces every failure as a plain error for the caller to report.
pub struct RelayClient {
    client: Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Post the conversation so far, newest user turn last, and return the
    /// single assistant turn the relay answers with. No retry, no timeout
    /// beyond the transport's own.
    pub async fn send(&self, turns: &[Turn]) -> Result<Turn> {
        let request = ChatRequest {
            messages: turns.to_vec(),
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await
            .context("relay request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("relay returned {}: {}", status, body);
        }

        response
            .json::<Turn>()
            .await
            .context("failed to decode relay response")
    }
}
