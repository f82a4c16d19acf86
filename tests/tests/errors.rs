//! Tests for error codes and status mapping.
//!
//! Validation failures are 422 with a `VALID_00x` code and per-field details,
//! unknown identifiers are 404, and store failures are 500 `DB_001`.

use axum::http::StatusCode;
use integration_tests::{fixtures, setup::TestContext};
use serde_json::{json, Value};

fn detail_fields(body: &Value) -> Vec<String> {
    body["details"]
        .as_array()
        .map(|details| {
            details
                .iter()
                .map(|d| d["field"].as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Rating outside 1..=5 returns VALID_003.
#[tokio::test]
async fn test_rating_out_of_range() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    for rating in [0, 6] {
        let response = server
            .post("/api/feedback")
            .json(&fixtures::feedback("content", "feedback", Some(rating)))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["code"], "VALID_003", "rating {} should be out of range", rating);
        assert_eq!(detail_fields(&body), vec!["rating"]);
    }

    let listed: Vec<Value> = server.get("/api/feedback").await.json();
    assert!(listed.is_empty(), "rejected submissions must not be stored");
}

/// Unknown category returns VALID_004.
#[tokio::test]
async fn test_invalid_category() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let response = server
        .post("/api/suggestions")
        .json(&fixtures::suggestion("invalid_category", None))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALID_004");
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(detail_fields(&body), vec!["category"]);
}

/// Enum violations on renamed fields are reported under their JSON key.
#[tokio::test]
async fn test_invalid_feedback_type_reported_as_type() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let response = server
        .post("/api/feedback")
        .json(&fixtures::feedback("performance", "complaint", Some(3)))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALID_004");
    assert_eq!(detail_fields(&body), vec!["type"]);

    let mut missing = fixtures::feedback("performance", "bug_report", None);
    missing.as_object_mut().unwrap().remove("type");
    let body: Value = server.post("/api/feedback").json(&missing).await.json();
    assert_eq!(body["code"], "VALID_002");
    assert_eq!(detail_fields(&body), vec!["type"]);
}

/// Missing or blank required fields return VALID_002, one detail per field.
#[tokio::test]
async fn test_missing_required_fields() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let response = server
        .post("/api/feedback")
        .json(&json!({ "title": "   ", "category": "content", "type": "feedback" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALID_002");
    assert_eq!(detail_fields(&body), vec!["description", "title"]);
}

/// A wrong JSON type returns VALID_001.
#[tokio::test]
async fn test_wrong_json_type() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let mut body = fixtures::bug_report();
    body["rating"] = json!("two");

    let response = server.post("/api/feedback").json(&body).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALID_001");
}

/// A body that is not JSON at all returns VALID_001.
#[tokio::test]
async fn test_malformed_json() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let response = server
        .post("/api/analytics")
        .content_type("application/json")
        .bytes("{\"page_path\": ".into())
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALID_001");
}

/// Analytics events need both page_path and action.
#[tokio::test]
async fn test_analytics_missing_action() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let response = server
        .post("/api/analytics")
        .json(&json!({ "page_path": "/home" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALID_002");
    assert_eq!(detail_fields(&body), vec!["action"]);
}

/// Bad enum values in query parameters and PATCH bodies return VALID_004.
#[tokio::test]
async fn test_invalid_enum_in_query_and_update() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let response = server
        .get("/api/feedback")
        .add_query_param("status", "archived")
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALID_004");
    assert_eq!(detail_fields(&body), vec!["status"]);

    let created: Value = server
        .post("/api/feedback")
        .json(&fixtures::bug_report())
        .await
        .json();
    let path = format!("/api/feedback/{}", created["id"].as_str().unwrap());

    let response = server.patch(&path).json(&json!({ "priority": "asap" })).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALID_004");

    let response = server.patch(&path).json(&json!({ "status": null })).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let unchanged: Value = server.get(&path).await.json();
    assert_eq!(unchanged["priority"], "medium");
    assert_eq!(unchanged["status"], "pending");
}

/// Unknown identifiers are 404 for lookup, update and vote.
#[tokio::test]
async fn test_unknown_identifiers() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let response = server.get("/api/feedback/invalid-id").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");

    let response = server
        .patch("/api/suggestions/invalid-id")
        .json(&json!({ "status": "closed" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server
        .patch("/api/feedback/invalid-id")
        .json(&json!({ "admin_notes": "note" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server.get("/api/suggestions/invalid-id").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

/// Store failures surface as DB_001 without leaking backend details.
#[tokio::test]
async fn test_store_failure_returns_500() {
    let (ctx, store) = TestContext::failing();
    let server = ctx.server();

    server
        .post("/api/feedback")
        .json(&fixtures::bug_report())
        .await
        .assert_status_ok();

    store.set_should_fail(true);

    for response in [
        server.post("/api/feedback").json(&fixtures::bug_report()).await,
        server.get("/api/feedback").await,
        server.get("/api/categories/stats").await,
        server.get("/api/admin/dashboard").await,
    ] {
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["code"], "DB_001");
        assert!(!body["error"].as_str().unwrap().contains("refused"));
    }

    store.set_should_fail(false);
    let listed: Vec<Value> = server.get("/api/feedback").await.json();
    assert_eq!(listed.len(), 1);
}

/// Validation runs before the store is touched.
#[tokio::test]
async fn test_validation_precedes_store_access() {
    let (ctx, store) = TestContext::failing();
    let server = ctx.server();
    store.set_should_fail(true);

    let response = server
        .post("/api/feedback")
        .json(&fixtures::feedback("content", "feedback", Some(9)))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}
