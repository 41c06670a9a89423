// Application state for HTTP handlers
use crate::application::dashboard_controller::DashboardController;
use crate::application::proxy_service::ProxyService;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub proxy_service: ProxyService,
    pub dashboard: Arc<DashboardController>,
    pub refresh_interval: Duration,
}
