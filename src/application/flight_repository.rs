// Repository traits for flight and airport data access
use crate::domain::airport::Airport;
use crate::domain::flight_stats::{FlightAggregate, GroupingMode};
use async_trait::async_trait;

#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// Flight and delay totals between two airports, grouped by carrier and,
    /// depending on `grouping`, by day or by month.
    ///
    /// Grouped results are returned in chronological order.
    async fn query_flight_aggregates(
        &self,
        origin: &str,
        destination: &str,
        grouping: GroupingMode,
    ) -> anyhow::Result<Vec<FlightAggregate>>;
}

#[async_trait]
pub trait AirportRepository: Send + Sync {
    /// Look up a single active airport by code
    async fn lookup_airport(&self, code: &str) -> anyhow::Result<Option<Airport>>;

    /// Active airports whose name, city or code contains `term`
    async fn search_airports(&self, term: &str) -> anyhow::Result<Vec<Airport>>;
}
