//! HTTP route handlers for the relay endpoint.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::relay::augment::augment;
use crate::session::types::Turn;

use super::state::RelayState;

/// Body of every relay failure response.
///
/// Clients get one opaque message whatever went wrong; the distinguishing
/// detail stays in the relay's log.
pub const GENERIC_ERROR: &str = "An error occurred while processing your request.";

/// Create the relay router with all routes.
pub fn create_router(state: Arc<RelayState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(chat))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "mdchat-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Chat relay request: the client's full conversation, oldest turn first.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Turn>,
}

/// Relay failure response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Forward a conversation to the completion API and return the reply turn.
///
/// The body is decoded by hand rather than through the `Json` extractor so
/// that an unreadable request and an upstream failure produce the same
/// response: status 500 with [`GENERIC_ERROR`].
async fn chat(State(state): State<Arc<RelayState>>, body: Bytes) -> Response {
    let request: ChatRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("[Relay] Unreadable chat request: {}", e);
            return error_response();
        }
    };

    tracing::debug!(
        "[Relay] Forwarding conversation of {} turns",
        request.messages.len()
    );

    let outbound = augment(&request.messages);
    match state.completion.complete(&outbound).await {
        Ok(reply) => Json(reply).into_response(),
        Err(e) => {
            tracing::error!("[Relay] Completion request failed: {}", e);
            error_response()
        }
    }
}

fn error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: GENERIC_ERROR.to_string(),
        }),
    )
        .into_response()
}
