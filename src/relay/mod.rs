//! HTTP Relay Endpoint
//!
//! A stateless forwarding layer between chat clients and the completion API:
//! - Accepts full conversations over POST /api/chat
//! - Appends the markdown instruction to the newest user turn
//! - Returns the assistant's reply turn, or one opaque error
//!
//! Information Hiding:
//! - Upstream API details (URL, credentials, model) stay inside
//!   [`CompletionClient`](crate::core::llm::CompletionClient)
//! - Failure causes stay in the relay's log; clients see a single shape

pub mod augment;
pub mod routes;
pub mod state;

pub use augment::{augment, MARKDOWN_INSTRUCTION};
pub use routes::{create_router, ChatRequest, ErrorBody, GENERIC_ERROR};
pub use state::RelayState;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Default relay port.
pub const DEFAULT_PORT: u16 = 3000;

/// Start the relay server and run it until the process exits.
pub async fn serve(state: Arc<RelayState>, port: u16) -> Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app: Router = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("[Relay] Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind relay to {}", addr))?;
    axum::serve(listener, app)
        .await
        .context("relay server error")?;

    Ok(())
}
