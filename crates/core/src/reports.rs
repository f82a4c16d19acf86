//! Derived reporting views. Never persisted.

use serde::{Deserialize, Serialize};

use crate::feedback::Feedback;
use crate::suggestion::Suggestion;
use crate::types::Category;

/// Per-category counts and mean rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: Category,
    pub feedback_count: u64,
    pub suggestion_count: u64,
    /// `None` when neither facet has a rating in this category.
    pub average_rating: Option<f64>,
}

/// Admin dashboard summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminDashboard {
    pub total_feedback: u64,
    pub total_suggestions: u64,
    pub pending_feedback: u64,
    pub pending_suggestions: u64,
    /// Priority `high` only; `urgent` items are not counted.
    pub high_priority_items: u64,
    pub recent_feedback: Vec<Feedback>,
    pub recent_suggestions: Vec<Suggestion>,
}

/// Arithmetic mean, or `None` for an empty set.
pub fn average_rating(ratings: &[i64]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().sum();
    Some(sum as f64 / ratings.len() as f64)
}
