//! Integration tests for mdchat
//!
//! These tests drive the relay and the session store against a mock
//! completion API; no real API keys are required.

use mdchat::storage::filesystem::FileStorage;
use mdchat::storage::memory::InMemoryStorage;
use mdchat::{
    create_router, CompletionClient, RelayClient, RelayState, SessionStore, GENERIC_ERROR,
};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Bind a relay wired to `upstream` on an ephemeral port, returning its base URL.
async fn spawn_relay(upstream: &MockServer) -> String {
    let completion = CompletionClient::new(upstream.uri(), "test-key", "o1-preview");
    let app = create_router(RelayState::new(completion));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[tokio::test]
async fn test_relay_appends_markdown_instruction_for_user_turn() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_json(json!({
            "model": "o1-preview",
            "messages": [
                { "role": "user", "content": "Hi (Please respond in markdown format)" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Hello")))
        .expect(1)
        .mount(&upstream)
        .await;

    let relay_url = spawn_relay(&upstream).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/chat", relay_url))
        .json(&json!({ "messages": [{ "role": "user", "content": "Hi" }] }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "role": "assistant", "content": "Hello" }));
}

#[tokio::test]
async fn test_relay_leaves_assistant_final_turn_unaugmented() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_json(json!({
            "model": "o1-preview",
            "messages": [
                { "role": "user", "content": "Hi" },
                { "role": "assistant", "content": "Hello" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Anything else?")))
        .expect(1)
        .mount(&upstream)
        .await;

    let relay_url = spawn_relay(&upstream).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/chat", relay_url))
        .json(&json!({
            "messages": [
                { "role": "user", "content": "Hi" },
                { "role": "assistant", "content": "Hello" }
            ]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_relay_collapses_upstream_failure_into_generic_error() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream detail"))
        .mount(&upstream)
        .await;

    let relay_url = spawn_relay(&upstream).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/chat", relay_url))
        .json(&json!({ "messages": [{ "role": "user", "content": "Hi" }] }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": GENERIC_ERROR }));
}

#[tokio::test]
async fn test_relay_rejects_unreadable_body_without_calling_upstream() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Hello")))
        .expect(0)
        .mount(&upstream)
        .await;

    let relay_url = spawn_relay(&upstream).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/chat", relay_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": GENERIC_ERROR }));
}

#[tokio::test]
async fn test_relay_collapses_malformed_upstream_payload() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&upstream)
        .await;

    let relay_url = spawn_relay(&upstream).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/chat", relay_url))
        .json(&json!({ "messages": [{ "role": "user", "content": "Hi" }] }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": GENERIC_ERROR }));
}

#[tokio::test]
async fn test_relay_collapses_empty_choices() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&upstream)
        .await;

    let relay_url = spawn_relay(&upstream).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/chat", relay_url))
        .json(&json!({ "messages": [{ "role": "user", "content": "Hi" }] }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": GENERIC_ERROR }));
}

#[tokio::test]
async fn test_health_endpoint() {
    let upstream = MockServer::start().await;
    let relay_url = spawn_relay(&upstream).await;

    let response = reqwest::Client::new()
        .get(format!("{}/health", relay_url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "mdchat-relay");
}

#[tokio::test]
async fn test_two_exchanges_snapshot_growing_records_and_round_trip() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Hello")))
        .expect(2)
        .mount(&upstream)
        .await;

    let relay_url = spawn_relay(&upstream).await;
    let temp_dir = TempDir::new().unwrap();
    let record_path = temp_dir.path().join("sessions.json");

    let storage = Arc::new(FileStorage::new(record_path.clone()));
    let mut store = SessionStore::new(RelayClient::new(&relay_url), storage).await;

    assert!(store.append_user_turn("Hi"));
    let reply = store.submit_exchange().await.unwrap();
    assert_eq!(reply.content, "Hello");

    assert!(store.append_user_turn("How are you?"));
    store.submit_exchange().await.unwrap();

    assert_eq!(store.records().len(), 2);
    assert_eq!(store.records()[0].turns.len(), 2);
    assert_eq!(store.records()[1].turns.len(), 4);

    // The stored conversation keeps the user's words; augmentation never leaks back.
    assert_eq!(store.records()[1].turns[0].content, "Hi");
    assert_eq!(store.records()[0].summary(), "Hi...");

    // A fresh store sees the same records.
    let storage = Arc::new(FileStorage::new(record_path));
    let mut restored = SessionStore::new(RelayClient::new(&relay_url), storage).await;
    assert_eq!(restored.records(), store.records());

    assert!(restored.select_record(1));
    assert_eq!(restored.active().len(), 4);
}

#[tokio::test]
async fn test_failed_exchange_leaves_no_record() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("down"))
        .mount(&upstream)
        .await;

    let relay_url = spawn_relay(&upstream).await;

    let storage = Arc::new(InMemoryStorage::new());
    let mut store = SessionStore::new(RelayClient::new(&relay_url), storage).await;

    assert!(store.append_user_turn("Hi"));
    assert!(store.submit_exchange().await.is_err());

    assert!(store.records().is_empty());
    // The pending user turn stays in place for a later attempt.
    assert_eq!(store.active().len(), 1);
    assert_eq!(store.active()[0].content, "Hi");
}

#[tokio::test]
async fn test_storage_write_failure_degrades_to_memory() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Hello")))
        .mount(&upstream)
        .await;

    let relay_url = spawn_relay(&upstream).await;

    // A regular file where the parent directory should be makes every save fail.
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();

    let storage = Arc::new(FileStorage::new(blocker.join("sessions.json")));
    let mut store = SessionStore::new(RelayClient::new(&relay_url), storage).await;

    assert!(store.append_user_turn("Hi"));
    let reply = store.submit_exchange().await.unwrap();

    assert_eq!(reply.content, "Hello");
    assert_eq!(store.records().len(), 1);
}
