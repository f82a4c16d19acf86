//! Greeting and status-check endpoints kept for older clients.

use axum::{extract::State, Json};
use feedback_core::{StatusCheck, StatusCheckCreate};

use crate::extractors::JsonBody;
use crate::response::{ApiError, MessageResponse};
use crate::state::AppState;

/// GET /api/
pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello World"))
}

/// POST /api/status
pub async fn create_status_check_handler(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<StatusCheckCreate>,
) -> Result<Json<StatusCheck>, ApiError> {
    let check = store::create_status_check(state.store(), input).await?;
    Ok(Json(check))
}

/// GET /api/status
pub async fn list_status_checks_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCheck>>, ApiError> {
    Ok(Json(store::list_status_checks(state.store()).await?))
}
