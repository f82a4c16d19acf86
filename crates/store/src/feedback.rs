//! Feedback facet operations.

use feedback_core::{
    EntityUpdate, EnumField, Feedback, FeedbackCreate, FeedbackQuery, Result,
};
use telemetry::metrics;
use tracing::{info, warn};

use crate::document::{Collection, DocumentStore, Filter, FindOptions};
use crate::records::{find_records, get_record, insert_record, update_record};

const KIND: &str = "feedback";

/// Builds the store filter for a feedback listing.
pub fn feedback_filter(query: &FeedbackQuery) -> Filter {
    Filter::new()
        .eq_opt("status", query.status.map(|s| s.as_str()))
        .eq_opt("category", query.category.map(|c| c.as_str()))
        .eq_opt("priority", query.priority.map(|p| p.as_str()))
        .eq_opt("type", query.feedback_type.map(|t| t.as_str()))
}

/// Validates and stores a new feedback item.
pub async fn create_feedback(
    store: &dyn DocumentStore,
    submission: FeedbackCreate,
) -> Result<Feedback> {
    let feedback = submission.into_feedback().inspect_err(|e| {
        metrics().validation_failures.inc();
        warn!(error = %e, "Rejected feedback submission");
    })?;

    insert_record(store, Collection::Feedback, &feedback).await?;
    metrics().feedback_submitted.inc();

    info!(
        id = %feedback.id,
        category = %feedback.category,
        feedback_type = %feedback.feedback_type,
        "Feedback submitted"
    );
    Ok(feedback)
}

/// Lists feedback in store order, narrowed by every given filter.
pub async fn list_feedback(store: &dyn DocumentStore, query: &FeedbackQuery) -> Result<Vec<Feedback>> {
    let options = FindOptions::new()
        .skip(query.page.skip)
        .limit(query.page.limit);
    find_records(store, Collection::Feedback, &feedback_filter(query), &options).await
}

pub async fn get_feedback(store: &dyn DocumentStore, id: &str) -> Result<Feedback> {
    get_record(store, Collection::Feedback, KIND, id).await
}

/// Applies a triage update and returns the stored result.
pub async fn update_feedback(
    store: &dyn DocumentStore,
    id: &str,
    update: &EntityUpdate,
) -> Result<Feedback> {
    let feedback: Feedback = update_record(store, Collection::Feedback, KIND, id, update).await?;
    info!(id, status = %feedback.status, priority = %feedback.priority, "Feedback updated");
    Ok(feedback)
}
