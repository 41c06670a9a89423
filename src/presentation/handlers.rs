// HTTP request handlers
use crate::domain::summary::StatusFilter;
use crate::infrastructure::http_response::{accepts_brotli, json_response, proxy_response};
use crate::presentation::app_state::AppState;
use crate::presentation::page::render_dashboard;
use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse},
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ViewQuery {
    pub status: Option<StatusFilter>,
}

#[derive(Deserialize)]
pub struct FilterRequest {
    pub status: StatusFilter,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Forward to the upstream backend, falling back to static data
pub async fn proxy_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let reply = state.proxy_service.fetch_dashboard().await;
    if reply.origin.is_fallback() {
        tracing::debug!("Serving fallback data ({})", reply.origin.as_str());
    }

    match proxy_response(&reply, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Current dashboard view as JSON
pub async fn dashboard_state(
    Query(query): Query<ViewQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let snapshot = state.dashboard.snapshot(query.status).await;

    match json_response(StatusCode::OK, &snapshot, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Poll now instead of waiting for the next tick. The poll runs as its own
/// task so a disconnecting client cannot leave it half-applied.
pub async fn refresh_dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let dashboard = Arc::clone(&state.dashboard);
    if let Err(e) = tokio::spawn(async move { dashboard.refresh().await }).await {
        tracing::error!("Manual refresh task failed: {}", e);
    }
    Json(state.dashboard.snapshot(None).await)
}

pub async fn select_filter(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FilterRequest>,
) -> impl IntoResponse {
    state.dashboard.set_filter(request.status).await;
    Json(state.dashboard.snapshot(None).await)
}

pub async fn dashboard_page(
    Query(query): Query<ViewQuery>,
    State(state): State<Arc<AppState>>,
) -> Html<String> {
    let snapshot = state.dashboard.snapshot(query.status).await;
    Html(render_dashboard(&snapshot, state.refresh_interval))
}
