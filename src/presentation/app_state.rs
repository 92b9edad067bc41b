// Application state for HTTP handlers
use crate::application::airport_service::AirportService;
use crate::application::flight_stats_service::FlightStatsService;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub airport_service: AirportService,
    pub flight_stats_service: FlightStatsService,
    pub request_timeout: Duration,
}
