// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_controller::DashboardController;
use crate::application::proxy_service::ProxyService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::http_upstream::HttpInventoryUpstream;
use crate::infrastructure::proxy_source::HttpDashboardSource;
use crate::presentation::app_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;
    tracing::info!(
        "Upstream {} (timeout {}ms, short-circuit {})",
        config.upstream.base_url,
        config.upstream.timeout_ms,
        config.upstream.short_circuits_to_fallback()
    );

    // Create upstream (infrastructure layer)
    let upstream = Arc::new(HttpInventoryUpstream::new(&config.upstream)?);

    // Create services (application layer)
    let proxy_service = ProxyService::new(upstream, &config.upstream);
    let refresh_interval = Duration::from_millis(config.dashboard.refresh_interval_ms);
    let source = HttpDashboardSource::new(config.proxy_url(), refresh_interval)?;
    let dashboard = Arc::new(DashboardController::new(Arc::new(source)));

    // Create application state
    let state = Arc::new(AppState {
        proxy_service,
        dashboard: dashboard.clone(),
        refresh_interval,
    });

    // Build router (presentation layer)
    let router = presentation::router(state);

    // Start server, then begin polling our own proxy route
    let addr: SocketAddr = config.server.bind.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting supply-chain dashboard on {}", addr);

    let poller = dashboard.spawn_poller(refresh_interval);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    poller.stop();
    tracing::info!("Dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
