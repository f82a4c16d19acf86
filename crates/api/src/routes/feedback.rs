//! Feedback endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use feedback_core::{Feedback, FeedbackCreate, FeedbackListParams, UpdateRequest};
use telemetry::metrics;
use tracing::debug;

use crate::extractors::{JsonBody, QueryParams};
use crate::response::ApiError;
use crate::state::AppState;

/// POST /api/feedback
pub async fn create_handler(
    State(state): State<AppState>,
    JsonBody(submission): JsonBody<FeedbackCreate>,
) -> Result<Json<Feedback>, ApiError> {
    let feedback = store::create_feedback(state.store(), submission).await?;
    Ok(Json(feedback))
}

/// GET /api/feedback
///
/// Filters by any of `status`, `category`, `priority` and `feedback_type`,
/// paged with `skip` and `limit`.
pub async fn list_handler(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<FeedbackListParams>,
) -> Result<Json<Vec<Feedback>>, ApiError> {
    let query = params.into_query().inspect_err(|_| {
        metrics().validation_failures.inc();
    })?;

    let items = store::list_feedback(state.store(), &query).await?;
    debug!(count = items.len(), skip = query.page.skip, limit = query.page.limit, "Listed feedback");
    Ok(Json(items))
}

/// GET /api/feedback/:id
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Feedback>, ApiError> {
    Ok(Json(store::get_feedback(state.store(), &id).await?))
}

/// PATCH /api/feedback/:id
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateRequest>,
) -> Result<Json<Feedback>, ApiError> {
    let update = request.into_update().inspect_err(|_| {
        metrics().validation_failures.inc();
    })?;

    Ok(Json(store::update_feedback(state.store(), &id, &update).await?))
}
