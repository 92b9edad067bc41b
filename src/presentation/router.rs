// Route table and HTTP middleware
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    daily_flight_stats, flight_stats_by_airline, get_airport, health_check, monthly_flight_stats,
    search_airports,
};
use axum::{http::HeaderValue, routing::get, Router};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>, cors_allow_origin: Option<&str>) -> anyhow::Result<Router> {
    let mut router = Router::new()
        .route("/healthz", get(health_check))
        .route("/airports", get(search_airports))
        .route("/airports/:code", get(get_airport))
        .route("/flight-stats/:origin/:destination", get(flight_stats_by_airline))
        .route("/flight-stats/:origin/:destination/daily", get(daily_flight_stats))
        .route("/flight-stats/:origin/:destination/monthly", get(monthly_flight_stats))
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    if let Some(origin) = cors_allow_origin {
        let origin: HeaderValue = origin.parse()?;
        router = router.layer(CorsLayer::new().allow_origin(origin));
    }

    Ok(router)
}
