//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint against the
//! in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use pastebin::{
    create_router,
    error::Result,
    models::{Paste, PasteDraft},
    AppState, MemoryStore, PasteStore,
};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = create_router(AppState::from_shared(store.clone()));
    (app, store)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_paste(app: &Router, title: &str, body: &str) -> i64 {
    let (status, json) = send(
        app,
        "POST",
        "/pastes",
        Some(json!({"title": title, "body": body})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["data"][0]["id"].as_i64().unwrap()
}

/// Store whose every statement fails, as if the database went away.
struct FailingStore;

#[async_trait]
impl PasteStore for FailingStore {
    async fn list_all(&self) -> Result<Vec<Paste>> {
        Err(sqlx::Error::PoolClosed.into())
    }

    async fn list_recent(&self, _limit: i64) -> Result<Vec<Paste>> {
        Err(sqlx::Error::PoolClosed.into())
    }

    async fn get_by_id(&self, _id: i32) -> Result<Option<Paste>> {
        Err(sqlx::Error::PoolClosed.into())
    }

    async fn insert(&self, _draft: &PasteDraft) -> Result<Paste> {
        Err(sqlx::Error::PoolClosed.into())
    }

    async fn update(&self, _id: i32, _draft: &PasteDraft) -> Result<Option<Paste>> {
        Err(sqlx::Error::PoolClosed.into())
    }

    async fn delete(&self, _id: i32) -> Result<Option<Paste>> {
        Err(sqlx::Error::PoolClosed.into())
    }
}

// == Create ==

#[tokio::test]
async fn test_create_with_empty_title_stores_null() {
    let (app, _) = create_test_app();

    let (status, json) = send(
        &app,
        "POST",
        "/pastes",
        Some(json!({"title": "", "body": "hello"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["status"], "Success");
    let paste = &json["data"][0];
    assert_eq!(paste["id"], 1);
    assert!(paste["title"].is_null());
    assert_eq!(paste["body"], "hello");
    assert!(paste["creation_date"].is_string());
}

#[tokio::test]
async fn test_create_empty_body_rejected() {
    let (app, store) = create_test_app();

    let (status, json) = send(
        &app,
        "POST",
        "/pastes",
        Some(json!({"title": "x", "body": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], "Failed");
    assert_eq!(json["message"], "Cannot submit a paste with an empty body.");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_create_malformed_json_rejected() {
    let (app, store) = create_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/pastes")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "Failed");
    assert!(store.is_empty().await);
}

// == Read ==

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let (app, _) = create_test_app();
    let id = create_paste(&app, "A", "B").await;

    let (status, json) = send(&app, "GET", &format!("/pastes/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "Success");
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["title"], "A");
    assert_eq!(json["data"][0]["body"], "B");
}

#[tokio::test]
async fn test_get_nonexistent_paste() {
    let (app, _) = create_test_app();

    let (status, json) = send(&app, "GET", "/pastes/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json,
        json!({
            "status": "Failed",
            "data": [],
            "message": "There is no paste with ID 999."
        })
    );
}

#[tokio::test]
async fn test_get_non_integer_id() {
    let (app, _) = create_test_app();

    let (status, json) = send(&app, "GET", "/pastes/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], "Failed");
    assert_eq!(json["message"], "Invalid paste ID 'abc'.");
}

#[tokio::test]
async fn test_undecodable_id_uses_envelope() {
    let (app, _) = create_test_app();

    for (method, body) in [
        ("GET", None),
        ("PUT", Some(json!({"title": "A", "body": "B"}))),
        ("DELETE", None),
    ] {
        let (status, json) = send(&app, method, "/pastes/%FF", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", method);
        assert_eq!(json["status"], "Failed");
        assert_eq!(json["data"], json!([]));
        assert!(json["message"].is_string());
    }
}

#[tokio::test]
async fn test_non_canonical_id_rejected() {
    let (app, _) = create_test_app();
    let id = create_paste(&app, "A", "B").await;
    assert_eq!(id, 1);

    for uri in ["/pastes/+1", "/pastes/0001", "/pastes/-0"] {
        let (status, json) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(json["status"], "Failed");
    }

    let (status, _) = send(&app, "GET", "/pastes/1", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_uses_envelope() {
    let (app, _) = create_test_app();

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"status": "Success", "message": "healthy"}));
}

#[tokio::test]
async fn test_list_all() {
    let (app, _) = create_test_app();
    create_paste(&app, "one", "1").await;
    create_paste(&app, "two", "2").await;

    let (status, json) = send(&app, "GET", "/pastes", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "Success");
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_recent_returns_ten_newest() {
    let (app, _) = create_test_app();
    let mut ids = Vec::new();
    for i in 0..12 {
        ids.push(create_paste(&app, "t", &format!("paste {}", i)).await);
    }

    let (status, json) = send(&app, "GET", "/pastes/recent", None).await;

    assert_eq!(status, StatusCode::OK);
    let returned: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    let expected: Vec<i64> = ids.iter().rev().take(10).copied().collect();
    assert_eq!(returned, expected);
}

#[tokio::test]
async fn test_recent_with_few_pastes() {
    let (app, _) = create_test_app();
    create_paste(&app, "only", "one").await;

    let (status, json) = send(&app, "GET", "/pastes/recent", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

// == Update ==

#[tokio::test]
async fn test_update_round_trip() {
    let (app, _) = create_test_app();
    let id = create_paste(&app, "A", "B").await;
    let uri = format!("/pastes/{}", id);

    let (status, json) = send(&app, "PUT", &uri, Some(json!({"title": "C", "body": "D"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"][0]["id"], id);

    let (_, json) = send(&app, "GET", &uri, None).await;
    assert_eq!(json["data"][0]["title"], "C");
    assert_eq!(json["data"][0]["body"], "D");
}

#[tokio::test]
async fn test_update_keeps_creation_date() {
    let (app, _) = create_test_app();
    let id = create_paste(&app, "A", "B").await;
    let uri = format!("/pastes/{}", id);

    let (_, before) = send(&app, "GET", &uri, None).await;
    let (_, after) = send(&app, "PUT", &uri, Some(json!({"title": "", "body": "D"}))).await;

    assert_eq!(
        before["data"][0]["creation_date"],
        after["data"][0]["creation_date"]
    );
    assert!(after["data"][0]["title"].is_null());
}

#[tokio::test]
async fn test_update_empty_body_leaves_row_unchanged() {
    let (app, _) = create_test_app();
    let id = create_paste(&app, "A", "B").await;
    let uri = format!("/pastes/{}", id);

    let (status, json) = send(&app, "PUT", &uri, Some(json!({"title": "C", "body": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], "Failed");

    let (_, json) = send(&app, "GET", &uri, None).await;
    assert_eq!(json["data"][0]["title"], "A");
    assert_eq!(json["data"][0]["body"], "B");
}

#[tokio::test]
async fn test_update_nonexistent_paste() {
    let (app, store) = create_test_app();

    let (status, json) = send(
        &app,
        "PUT",
        "/pastes/42",
        Some(json!({"title": "C", "body": "D"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "There is no paste with ID 42.");
    assert!(store.is_empty().await);
}

// == Delete ==

#[tokio::test]
async fn test_delete_then_get_not_found() {
    let (app, store) = create_test_app();
    let id = create_paste(&app, "A", "B").await;
    let uri = format!("/pastes/{}", id);

    let (status, json) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "Success");
    assert_eq!(json["message"], format!("Paste {} was deleted.", id));

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_delete_twice_returns_not_found() {
    let (app, store) = create_test_app();
    let id = create_paste(&app, "A", "B").await;
    let keep = create_paste(&app, "keep", "me").await;
    let uri = format!("/pastes/{}", id);

    send(&app, "DELETE", &uri, None).await;
    let (status, json) = send(&app, "DELETE", &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], "Failed");
    assert_eq!(store.len().await, 1);

    let (status, _) = send(&app, "GET", &format!("/pastes/{}", keep), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_never_created() {
    let (app, _) = create_test_app();
    create_paste(&app, "A", "B").await;

    let (status, _) = send(&app, "DELETE", "/pastes/12345", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = send(&app, "GET", "/pastes", None).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_ids_not_reused_after_delete() {
    let (app, _) = create_test_app();
    let first = create_paste(&app, "A", "B").await;
    send(&app, "DELETE", &format!("/pastes/{}", first), None).await;

    let second = create_paste(&app, "A", "B").await;
    assert!(second > first);
}

// == Storage Failures ==

#[tokio::test]
async fn test_storage_failure_is_server_error() {
    let app = create_router(AppState::new(FailingStore));

    let (status, json) = send(&app, "GET", "/pastes", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["status"], "Failed");
    assert_eq!(json["message"], "Internal server error.");

    let (status, _) = send(
        &app,
        "POST",
        "/pastes",
        Some(json!({"title": "A", "body": "B"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_validation_runs_before_storage() {
    let app = create_router(AppState::new(FailingStore));

    let (status, _) = send(
        &app,
        "POST",
        "/pastes",
        Some(json!({"title": "A", "body": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "DELETE", "/pastes/nope", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
