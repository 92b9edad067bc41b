// Flight stats service - The three query shapes exposed to clients
use crate::application::error::{none_if_invalid, QueryError};
use crate::application::stats_aggregator::StatsAggregator;
use crate::domain::flight_stats::{AirlineFlightStats, FlightStatsByDate, GroupingMode};
use tokio_util::sync::CancellationToken;

/// Wraps the aggregator. Every query returns `Ok(None)` when an airport code
/// is malformed, and `Ok(Some(vec![]))` when the route simply has no data.
#[derive(Clone)]
pub struct FlightStatsService {
    aggregator: StatsAggregator,
}

impl FlightStatsService {
    pub fn new(aggregator: StatsAggregator) -> Self {
        Self { aggregator }
    }

    /// One row per airline, best on-time percentage first
    pub async fn flight_stats_by_airline(
        &self,
        origin: &str,
        destination: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Vec<AirlineFlightStats>>, QueryError> {
        let series = self
            .aggregator
            .compute_stats(origin, destination, GroupingMode::Ungrouped, cancel)
            .await;

        Ok(none_if_invalid(series)?.map(|series| {
            series
                .iter()
                .filter_map(AirlineFlightStats::from_series)
                .collect()
        }))
    }

    pub async fn daily_flight_stats(
        &self,
        origin: &str,
        destination: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Vec<FlightStatsByDate>>, QueryError> {
        self.stats_by_date(origin, destination, GroupingMode::ByDay, cancel)
            .await
    }

    pub async fn monthly_flight_stats(
        &self,
        origin: &str,
        destination: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Vec<FlightStatsByDate>>, QueryError> {
        self.stats_by_date(origin, destination, GroupingMode::ByMonth, cancel)
            .await
    }

    async fn stats_by_date(
        &self,
        origin: &str,
        destination: &str,
        grouping: GroupingMode,
        cancel: &CancellationToken,
    ) -> Result<Option<Vec<FlightStatsByDate>>, QueryError> {
        let series = self
            .aggregator
            .compute_stats(origin, destination, grouping, cancel)
            .await;

        Ok(none_if_invalid(series)?
            .map(|series| series.into_iter().map(FlightStatsByDate::from).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::flight_repository::stub::StubRepository;
    use crate::domain::flight_stats::FlightAggregate;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service(repo: StubRepository) -> FlightStatsService {
        FlightStatsService::new(StatsAggregator::new(Arc::new(repo)))
    }

    fn route_records() -> Vec<FlightAggregate> {
        vec![
            FlightAggregate {
                period_start: date(2019, 1, 1),
                period_end: date(2019, 1, 31),
                carrier: "United Air Lines Inc.".to_string(),
                total_flights: 100,
                total_delays: 10,
            },
            FlightAggregate {
                period_start: date(2019, 1, 2),
                period_end: date(2019, 2, 14),
                carrier: "Frontier Airlines Inc.".to_string(),
                total_flights: 50,
                total_delays: 0,
            },
        ]
    }

    #[tokio::test]
    async fn test_flight_stats_by_airline() {
        let svc = service(StubRepository::with_aggregates(route_records()));

        let rows = svc
            .flight_stats_by_airline("DEN", "LAS", &CancellationToken::new())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].airline, "Frontier Airlines Inc.");
        assert_eq!(rows[0].total_flights, 50);
        assert_eq!(rows[0].on_time_percentage, 100.0);
        assert_eq!(
            rows[0].last_flight,
            Utc.with_ymd_and_hms(2019, 2, 14, 0, 0, 0).unwrap()
        );
        assert_eq!(rows[1].airline, "United Air Lines Inc.");
        assert_eq!(rows[1].on_time_percentage, 90.0);
    }

    #[tokio::test]
    async fn test_invalid_code_is_none() {
        let svc = service(StubRepository::with_aggregates(route_records()));
        let cancel = CancellationToken::new();

        assert!(svc.flight_stats_by_airline("FOUR", "LAS", &cancel).await.unwrap().is_none());
        assert!(svc.daily_flight_stats("DEN", "FOUR", &cancel).await.unwrap().is_none());
        assert!(svc.monthly_flight_stats("12", "LAS", &cancel).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_no_data_is_empty_list() {
        let svc = service(StubRepository::default());
        let cancel = CancellationToken::new();

        assert_eq!(svc.flight_stats_by_airline("DEN", "LAS", &cancel).await.unwrap(), Some(vec![]));
        assert_eq!(svc.daily_flight_stats("DEN", "LAS", &cancel).await.unwrap(), Some(vec![]));
        assert_eq!(svc.monthly_flight_stats("DEN", "LAS", &cancel).await.unwrap(), Some(vec![]));
    }

    #[tokio::test]
    async fn test_daily_rows() {
        let records = vec![
            FlightAggregate {
                period_start: date(2019, 1, 1),
                period_end: date(2019, 1, 1),
                carrier: "Spirit Air Lines".to_string(),
                total_flights: 100,
                total_delays: 10,
            },
            FlightAggregate {
                period_start: date(2019, 1, 2),
                period_end: date(2019, 1, 2),
                carrier: "Spirit Air Lines".to_string(),
                total_flights: 10,
                total_delays: 0,
            },
            FlightAggregate {
                period_start: date(2019, 1, 3),
                period_end: date(2019, 1, 3),
                carrier: "Spirit Air Lines".to_string(),
                total_flights: 23,
                total_delays: 4,
            },
        ];
        let svc = service(StubRepository::with_aggregates(records));

        let stats = svc
            .daily_flight_stats("den", "las", &CancellationToken::new())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(stats.len(), 1);
        let pcts: Vec<f64> = stats[0].rows.iter().map(|r| r.on_time_percentage).collect();
        assert_eq!(pcts, vec![90.0, 100.0, 82.6086956521739]);
        assert_eq!(
            stats[0].rows[2].date,
            Utc.with_ymd_and_hms(2019, 1, 3, 0, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_monthly_rows_are_first_of_month() {
        let svc = service(StubRepository::with_aggregates(route_records()));

        let stats = svc
            .monthly_flight_stats("DEN", "LAS", &CancellationToken::new())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(stats[0].airline, "Frontier Airlines Inc.");
        assert_eq!(
            stats[0].rows[0].date,
            Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(stats[1].airline, "United Air Lines Inc.");
    }

    #[tokio::test]
    async fn test_data_source_error_is_not_swallowed() {
        let svc = service(StubRepository::failing());
        let err = svc
            .daily_flight_stats("DEN", "LAS", &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::DataSource(_)));
    }

    #[tokio::test]
    async fn test_invalid_input_wins_over_failing_source() {
        let svc = service(StubRepository::failing());
        let result = svc
            .flight_stats_by_airline("FOUR", "LAS", &CancellationToken::new())
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
