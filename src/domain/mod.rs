// Domain layer - Flight statistics and airport reference data
pub mod airport;
pub mod flight_stats;
pub mod validation;
