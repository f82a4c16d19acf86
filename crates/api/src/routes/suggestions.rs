//! Suggestion endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use feedback_core::{Suggestion, SuggestionCreate, SuggestionListParams, UpdateRequest};
use telemetry::metrics;
use tracing::debug;

use crate::extractors::{JsonBody, QueryParams};
use crate::response::{ApiError, MessageResponse};
use crate::state::AppState;

/// POST /api/suggestions
pub async fn create_handler(
    State(state): State<AppState>,
    JsonBody(submission): JsonBody<SuggestionCreate>,
) -> Result<Json<Suggestion>, ApiError> {
    let suggestion = store::create_suggestion(state.store(), submission).await?;
    Ok(Json(suggestion))
}

/// GET /api/suggestions
pub async fn list_handler(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SuggestionListParams>,
) -> Result<Json<Vec<Suggestion>>, ApiError> {
    let query = params.into_query().inspect_err(|_| {
        metrics().validation_failures.inc();
    })?;

    let items = store::list_suggestions(state.store(), &query).await?;
    debug!(count = items.len(), skip = query.page.skip, limit = query.page.limit, "Listed suggestions");
    Ok(Json(items))
}

/// GET /api/suggestions/:id
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Suggestion>, ApiError> {
    Ok(Json(store::get_suggestion(state.store(), &id).await?))
}

/// PATCH /api/suggestions/:id
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateRequest>,
) -> Result<Json<Suggestion>, ApiError> {
    let update = request.into_update().inspect_err(|_| {
        metrics().validation_failures.inc();
    })?;

    Ok(Json(store::update_suggestion(state.store(), &id, &update).await?))
}

/// POST /api/suggestions/:id/vote
pub async fn vote_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    store::vote(state.store(), &id).await?;
    Ok(Json(MessageResponse::new("Vote recorded successfully")))
}
