//! API routes.

pub mod analytics;
pub mod feedback;
pub mod health;
pub mod reports;
pub mod root;
pub mod suggestions;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

/// Creates the API router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api", get(root::root_handler))
        .route("/api/", get(root::root_handler))
        .route(
            "/api/status",
            post(root::create_status_check_handler).get(root::list_status_checks_handler),
        )
        .route(
            "/api/feedback",
            post(feedback::create_handler).get(feedback::list_handler),
        )
        .route(
            "/api/feedback/:id",
            get(feedback::get_handler).patch(feedback::update_handler),
        )
        .route(
            "/api/suggestions",
            post(suggestions::create_handler).get(suggestions::list_handler),
        )
        .route(
            "/api/suggestions/:id",
            get(suggestions::get_handler).patch(suggestions::update_handler),
        )
        .route("/api/suggestions/:id/vote", post(suggestions::vote_handler))
        .route("/api/analytics", post(analytics::record_handler))
        .route("/api/categories/stats", get(reports::category_stats_handler))
        .route("/api/admin/dashboard", get(reports::dashboard_handler))
        .route("/health", get(health::health_handler))
        .route("/health/ready", get(health::ready_handler))
        .route("/health/live", get(health::live_handler))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
