use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use dashboard_engine::run_pipeline;
use models::{Dashboard, SidebarSpec};
use std::sync::Arc;

use crate::page::{render_page, PageBody};
use crate::source::RecordSource;
use crate::Result;

/// Everything a render needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn RecordSource>,
    pub sidebar: Arc<SidebarSpec>,
    pub page_title: Arc<str>,
}

async fn build_dashboard(state: &AppState) -> Result<Dashboard> {
    let records = state.source.fetch_records().await?;
    Ok(run_pipeline(records, &state.page_title))
}

/// GET /
/// Fetches, computes and renders the full page. Failures render an inline error and no charts.
pub async fn dashboard_page(State(state): State<AppState>) -> impl IntoResponse {
    match build_dashboard(&state).await {
        Ok(dashboard) => {
            let html = render_page(&state.page_title, &state.sidebar, PageBody::Dashboard(&dashboard));
            (StatusCode::OK, Html(html))
        }
        Err(e) => {
            tracing::error!(error = %e, "dashboard render failed");
            let html = render_page(&state.page_title, &state.sidebar, PageBody::Error(e.to_string()));
            (e.status_code(), Html(html))
        }
    }
}

/// GET /api/dashboard
/// Returns the computed dashboard as JSON
pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<Dashboard>> {
    let dashboard = build_dashboard(&state).await?;
    Ok(Json(dashboard))
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "budget-dashboard"
    }))
}
