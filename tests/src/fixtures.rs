//! Request bodies shared by the end-to-end tests.

use serde_json::{json, Value};
use uuid::Uuid;

/// A valid feedback submission.
pub fn feedback(category: &str, feedback_type: &str, rating: Option<i64>) -> Value {
    json!({
        "title": format!("Feedback {}", short_id()),
        "description": "The settings page takes a long time to load",
        "category": category,
        "type": feedback_type,
        "rating": rating,
        "user_email": "tester@example.com",
        "user_name": "Tester",
    })
}

/// The bug report used throughout the triage flow tests.
pub fn bug_report() -> Value {
    json!({
        "title": "X",
        "description": "Y",
        "category": "performance",
        "type": "bug_report",
        "rating": 2,
    })
}

/// A valid suggestion submission.
pub fn suggestion(category: &str, rating: Option<i64>) -> Value {
    json!({
        "title": format!("Suggestion {}", short_id()),
        "description": "Let people export their history as CSV",
        "category": category,
        "rating": rating,
        "expected_benefit": "Less manual copying",
        "is_anonymous": true,
    })
}

/// A valid analytics event without id or timestamp.
pub fn analytics_event(action: &str) -> Value {
    json!({
        "page_path": "/feedback/new",
        "action": action,
        "session_id": Uuid::new_v4().to_string(),
        "user_agent": "Mozilla/5.0 (Test)",
    })
}

fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}
