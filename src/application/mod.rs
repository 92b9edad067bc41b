// Application layer - Use cases over the flight data source
pub mod airport_service;
pub mod error;
pub mod flight_repository;
pub mod flight_stats_service;
pub mod stats_aggregator;
