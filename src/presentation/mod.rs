// Presentation layer - HTTP surface
pub mod app_state;
pub mod handlers;
pub mod page;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dashboard_page, dashboard_state, health_check, proxy_dashboard, refresh_dashboard,
    select_filter,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/healthz", get(health_check))
        .route("/api/data/dashboard", get(proxy_dashboard))
        .route("/api/dashboard/state", get(dashboard_state))
        .route("/api/dashboard/refresh", post(refresh_dashboard))
        .route("/api/dashboard/filter", post(select_filter))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
