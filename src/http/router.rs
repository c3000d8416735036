//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Timer lifecycle
        .route("/timer/start", post(handlers::start_timer))
        .route("/timer/stop", post(handlers::stop_timer))
        .route("/timer", get(handlers::timer_status))
        // Entry CRUD
        .route("/entries", get(handlers::list_entries))
        .route("/entries", post(handlers::log_entry))
        .route("/entries/{id}", get(handlers::get_entry))
        .route("/entries/{id}", patch(handlers::update_entry))
        .route("/entries/{id}", delete(handlers::delete_entry))
        // Projects and tasks
        .route("/projects", get(handlers::list_projects))
        .route("/projects", post(handlers::create_project))
        .route("/projects/{id}", delete(handlers::delete_project))
        .route("/projects/{id}/tasks", get(handlers::list_tasks))
        .route("/projects/{id}/tasks", post(handlers::create_task))
        .route("/tasks/{id}", delete(handlers::delete_task))
        // Goals
        .route("/goals", get(handlers::list_goals))
        .route("/goals", post(handlers::create_goal))
        .route("/goals/{id}", delete(handlers::delete_goal))
        .route("/goals/{id}/progress", get(handlers::goal_progress))
        // Reports
        .route("/reports", get(handlers::get_report))
        .route("/reports/heatmap", get(handlers::get_heatmap))
        .route("/reports/streak", get(handlers::get_streak));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
