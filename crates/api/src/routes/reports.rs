//! Reporting endpoints. Both are computed from the store on every request.

use axum::{extract::State, Json};
use feedback_core::{AdminDashboard, CategoryStats};

use crate::response::ApiError;
use crate::state::AppState;

/// GET /api/categories/stats
pub async fn category_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryStats>>, ApiError> {
    Ok(Json(store::category_stats(state.store()).await?))
}

/// GET /api/admin/dashboard
pub async fn dashboard_handler(
    State(state): State<AppState>,
) -> Result<Json<AdminDashboard>, ApiError> {
    Ok(Json(store::admin_dashboard(state.store()).await?))
}
