//! Interaction event endpoint.

use axum::{extract::State, Json};
use feedback_core::{AnalyticsEventInput, UserAnalytics};

use crate::extractors::JsonBody;
use crate::response::ApiError;
use crate::state::AppState;

/// POST /api/analytics - Records an event and echoes what was stored.
pub async fn record_handler(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<AnalyticsEventInput>,
) -> Result<Json<UserAnalytics>, ApiError> {
    Ok(Json(store::record_event(state.store(), input).await?))
}
