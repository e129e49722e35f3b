use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, AppState};

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard_page))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/health", get(handlers::health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
