//! End-to-end tests for category statistics and the admin dashboard.

use integration_tests::{fixtures, setup::TestContext};
use serde_json::{json, Value};

const CATEGORIES: [&str; 8] = [
    "user_interface",
    "social_features",
    "content",
    "functionality",
    "performance",
    "security",
    "accessibility",
    "other",
];

/// An empty service still reports all eight categories, with null averages.
#[tokio::test]
async fn test_empty_category_stats() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let response = server.get("/api/categories/stats").await;
    response.assert_status_ok();
    let stats: Vec<Value> = response.json();

    let names: Vec<&str> = stats.iter().map(|s| s["category"].as_str().unwrap()).collect();
    assert_eq!(names, CATEGORIES);
    for entry in &stats {
        assert_eq!(entry["feedback_count"], 0);
        assert_eq!(entry["suggestion_count"], 0);
        assert!(entry["average_rating"].is_null());
    }
}

/// Averages combine feedback and suggestion ratings and skip unrated items.
#[tokio::test]
async fn test_category_average_rating() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    for body in [
        fixtures::feedback("performance", "bug_report", Some(2)),
        fixtures::feedback("performance", "feedback", None),
        fixtures::feedback("security", "feedback", Some(5)),
    ] {
        server.post("/api/feedback").json(&body).await.assert_status_ok();
    }
    server
        .post("/api/suggestions")
        .json(&fixtures::suggestion("performance", Some(5)))
        .await
        .assert_status_ok();

    let stats: Vec<Value> = server.get("/api/categories/stats").await.json();
    let performance = &stats[4];
    assert_eq!(performance["category"], "performance");
    assert_eq!(performance["feedback_count"], 2);
    assert_eq!(performance["suggestion_count"], 1);
    assert_eq!(performance["average_rating"], 3.5);

    let security = &stats[5];
    assert_eq!(security["average_rating"], 5.0);

    let content = &stats[2];
    assert!(content["average_rating"].is_null());
}

/// Dashboard totals, pending counts and the high priority count.
#[tokio::test]
async fn test_dashboard_counts() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let mut feedback_ids = Vec::new();
    for _ in 0..3 {
        let body: Value = server
            .post("/api/feedback")
            .json(&fixtures::feedback("content", "feedback", Some(3)))
            .await
            .json();
        feedback_ids.push(body["id"].as_str().unwrap().to_string());
    }
    let suggestion: Value = server
        .post("/api/suggestions")
        .json(&fixtures::suggestion("content", None))
        .await
        .json();

    server
        .patch(&format!("/api/feedback/{}", feedback_ids[0]))
        .json(&json!({ "priority": "high", "status": "reviewed" }))
        .await
        .assert_status_ok();
    server
        .patch(&format!("/api/feedback/{}", feedback_ids[1]))
        .json(&json!({ "priority": "urgent" }))
        .await
        .assert_status_ok();
    server
        .patch(&format!("/api/suggestions/{}", suggestion["id"].as_str().unwrap()))
        .json(&json!({ "priority": "high" }))
        .await
        .assert_status_ok();

    let response = server.get("/api/admin/dashboard").await;
    response.assert_status_ok();
    let dashboard: Value = response.json();

    assert_eq!(dashboard["total_feedback"], 3);
    assert_eq!(dashboard["total_suggestions"], 1);
    assert_eq!(dashboard["pending_feedback"], 2);
    assert_eq!(dashboard["pending_suggestions"], 1);
    assert_eq!(dashboard["high_priority_items"], 2);
}

/// The dashboard lists the five newest items, newest first.
#[tokio::test]
async fn test_dashboard_recent_items() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let mut ids = Vec::new();
    for _ in 0..6 {
        let body: Value = server
            .post("/api/feedback")
            .json(&fixtures::feedback("other", "feedback", None))
            .await
            .json();
        ids.push(body["id"].clone());
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let dashboard: Value = server.get("/api/admin/dashboard").await.json();
    let recent = dashboard["recent_feedback"].as_array().unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0]["id"], ids[5]);
    assert_eq!(recent[4]["id"], ids[1]);
    assert!(dashboard["recent_suggestions"].as_array().unwrap().is_empty());
}
