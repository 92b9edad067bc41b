// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::airport_service::AirportService;
use crate::application::flight_stats_service::FlightStatsService;
use crate::application::stats_aggregator::StatsAggregator;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::sqlite_repository::SqliteRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(SqliteRepository::open(&config.database.path)?);

    // Create services (application layer)
    let airport_service = AirportService::new(repository.clone());
    let flight_stats_service = FlightStatsService::new(StatsAggregator::new(repository));

    // Create application state
    let state = Arc::new(AppState {
        airport_service,
        flight_stats_service,
        request_timeout: config.server.request_timeout(),
    });

    // Build router (presentation layer)
    let router = build_router(state, config.server.cors_allow_origin.as_deref())?;

    // Start server
    let addr: SocketAddr = config.server.listen_addr.parse()?;
    tracing::info!(
        "Starting flightranker service on {} (database {})",
        addr,
        config.database.path
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
