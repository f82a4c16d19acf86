//! Suggestion facet operations.

use feedback_core::{
    EntityUpdate, EnumField, Error, Result, Suggestion, SuggestionCreate, SuggestionQuery,
};
use telemetry::metrics;
use tracing::{info, warn};

use crate::document::{Collection, DocumentStore, Filter, FindOptions};
use crate::records::{find_records, get_record, insert_record, timed, update_record};

const KIND: &str = "suggestion";

pub fn suggestion_filter(query: &SuggestionQuery) -> Filter {
    Filter::new()
        .eq_opt("status", query.status.map(|s| s.as_str()))
        .eq_opt("category", query.category.map(|c| c.as_str()))
        .eq_opt("priority", query.priority.map(|p| p.as_str()))
}

/// Validates and stores a new suggestion with zero votes.
pub async fn create_suggestion(
    store: &dyn DocumentStore,
    submission: SuggestionCreate,
) -> Result<Suggestion> {
    let suggestion = submission.into_suggestion().inspect_err(|e| {
        metrics().validation_failures.inc();
        warn!(error = %e, "Rejected suggestion submission");
    })?;

    insert_record(store, Collection::Suggestions, &suggestion).await?;
    metrics().suggestions_submitted.inc();

    info!(id = %suggestion.id, category = %suggestion.category, "Suggestion submitted");
    Ok(suggestion)
}

pub async fn list_suggestions(
    store: &dyn DocumentStore,
    query: &SuggestionQuery,
) -> Result<Vec<Suggestion>> {
    let options = FindOptions::new()
        .skip(query.page.skip)
        .limit(query.page.limit);
    find_records(store, Collection::Suggestions, &suggestion_filter(query), &options).await
}

pub async fn get_suggestion(store: &dyn DocumentStore, id: &str) -> Result<Suggestion> {
    get_record(store, Collection::Suggestions, KIND, id).await
}

pub async fn update_suggestion(
    store: &dyn DocumentStore,
    id: &str,
    update: &EntityUpdate,
) -> Result<Suggestion> {
    let suggestion: Suggestion =
        update_record(store, Collection::Suggestions, KIND, id, update).await?;
    info!(id, status = %suggestion.status, priority = %suggestion.priority, "Suggestion updated");
    Ok(suggestion)
}

/// Adds one vote. The increment happens inside the store, so concurrent
/// votes on the same suggestion are never lost.
pub async fn vote(store: &dyn DocumentStore, id: &str) -> Result<()> {
    let matched = timed(
        "increment",
        Collection::Suggestions,
        store.increment(Collection::Suggestions, &Filter::by_id(id), "votes", 1),
    )
    .await?;

    if !matched {
        metrics().not_found.inc();
        warn!(id, "Vote for unknown suggestion");
        return Err(Error::not_found(KIND, id));
    }

    metrics().votes_recorded.inc();
    info!(id, "Vote recorded");
    Ok(())
}
