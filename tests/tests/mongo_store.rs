//! Tests against a real MongoDB.
//!
//! Requires Docker to be running for testcontainers:
//! `cargo test -p integration-tests --test mongo_store -- --ignored`

use integration_tests::{containers::TestMongo, fixtures, setup::TestContext};
use serde_json::Value;
use std::sync::Arc;
use store::{Collection, DocumentStore, Filter, FindOptions, MongoStore, StoreBackend, StoreConfig};
use uuid::Uuid;

async fn mongo_store(mongo: &TestMongo) -> Arc<MongoStore> {
    let config = StoreConfig {
        backend: StoreBackend::Mongo,
        mongo_url: mongo.url.clone(),
        database: format!("feedback_test_{}", Uuid::new_v4().simple()),
        ..Default::default()
    };
    let store = MongoStore::new(config)
        .await
        .expect("Failed to create MongoDB store");
    store.init_indexes().await.expect("Failed to create indexes");
    Arc::new(store)
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_ping() {
    let mongo = TestMongo::start().await;
    let store = mongo_store(&mongo).await;
    store.ping().await.expect("ping should succeed");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_feedback_round_trip_over_http() {
    let mongo = TestMongo::start().await;
    let store = mongo_store(&mongo).await;
    let ctx = TestContext::with_store(store.clone());
    let server = ctx.server();

    let created: Value = server
        .post("/api/feedback")
        .json(&fixtures::bug_report())
        .await
        .json();
    let id = created["id"].as_str().unwrap();

    let fetched: Value = server.get(&format!("/api/feedback/{}", id)).await.json();
    assert_eq!(fetched, created);
    assert!(fetched.get("_id").is_none(), "Mongo ids must not leak");

    let stats: Vec<Value> = server.get("/api/categories/stats").await.json();
    assert_eq!(stats[4]["category"], "performance");
    assert_eq!(stats[4]["average_rating"], 2.0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_concurrent_votes_use_atomic_increment() {
    let mongo = TestMongo::start().await;
    let store = mongo_store(&mongo).await;
    let ctx = TestContext::with_store(store.clone());
    let server = ctx.server();

    let created: Value = server
        .post("/api/suggestions")
        .json(&fixtures::suggestion("content", None))
        .await
        .json();
    let path = format!("/api/suggestions/{}/vote", created["id"].as_str().unwrap());

    let responses =
        futures::future::join_all((0..30).map(|_| async { server.post(&path).await })).await;
    for response in responses {
        response.assert_status_ok();
    }

    let stored = store
        .find_one(
            Collection::Suggestions,
            &Filter::by_id(created["id"].as_str().unwrap()),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored["votes"], 30);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_sorted_find_and_limit_zero() {
    let mongo = TestMongo::start().await;
    let store = mongo_store(&mongo).await;

    for (id, created) in [("a", "2024-01-01"), ("b", "2024-03-01"), ("c", "2024-02-01")] {
        let document = serde_json::json!({ "id": id, "created_at": created })
            .as_object()
            .cloned()
            .unwrap();
        store.insert(Collection::Feedback, document).await.unwrap();
    }

    let newest = store
        .find(
            Collection::Feedback,
            &Filter::new(),
            &FindOptions::new()
                .sort("created_at", store::SortOrder::Descending)
                .limit(2),
        )
        .await
        .unwrap();
    let ids: Vec<&str> = newest.iter().map(|d| d["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["b", "c"]);

    let none = store
        .find(Collection::Feedback, &Filter::new(), &FindOptions::new().limit(0))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_analytics_events_may_repeat_client_id() {
    let mongo = TestMongo::start().await;
    let store = mongo_store(&mongo).await;
    let ctx = TestContext::with_store(store.clone());
    let server = ctx.server();

    let mut event = fixtures::analytics_event("click");
    event["id"] = Value::from("e1");

    for _ in 0..2 {
        let response = server.post("/api/analytics").json(&event).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["id"], "e1");
    }

    let count = store
        .count(Collection::UserAnalytics, &Filter::by_id("e1"))
        .await
        .unwrap();
    assert_eq!(count, 2);
}
