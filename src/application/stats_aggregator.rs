// Stats aggregator - Groups flight records into per-airline series
use crate::application::error::{run_cancellable, QueryError};
use crate::application::flight_repository::FlightRepository;
use crate::domain::flight_stats::{AirlineSeries, FlightAggregate, GroupingMode, StatsBucket};
use crate::domain::validation::is_airport_code;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub struct StatsAggregator {
    repository: Arc<dyn FlightRepository>,
}

impl StatsAggregator {
    pub fn new(repository: Arc<dyn FlightRepository>) -> Self {
        Self { repository }
    }

    /// Compute one series per airline for flights from `origin` to
    /// `destination`.
    ///
    /// Airport codes are uppercased before validation. Ungrouped results are
    /// ranked best on-time percentage first; daily and monthly results are
    /// ordered by airline name.
    pub async fn compute_stats(
        &self,
        origin: &str,
        destination: &str,
        grouping: GroupingMode,
        cancel: &CancellationToken,
    ) -> Result<Vec<AirlineSeries>, QueryError> {
        let origin = origin.to_ascii_uppercase();
        let destination = destination.to_ascii_uppercase();
        if !is_airport_code(&origin) || !is_airport_code(&destination) {
            return Err(QueryError::InvalidAirportCode);
        }

        let records = run_cancellable(
            cancel,
            self.repository
                .query_flight_aggregates(&origin, &destination, grouping),
        )
        .await?;

        tracing::debug!(
            "{} aggregate rows for {} -> {} ({:?})",
            records.len(),
            origin,
            destination,
            grouping
        );

        let mut series = consolidate(records, grouping);
        rank(&mut series, grouping);
        Ok(series)
    }
}

/// Collect records into one series per carrier. Series come out in order of
/// each carrier's first appearance; buckets keep record order.
fn consolidate(records: Vec<FlightAggregate>, grouping: GroupingMode) -> Vec<AirlineSeries> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut series: Vec<AirlineSeries> = Vec::new();

    for record in records {
        let bucket = StatsBucket {
            start: grouping.period_start(record.period_start),
            end: record.period_end,
            flights: record.total_flights,
            delays: record.total_delays,
        };

        let slot = *index.entry(record.carrier.clone()).or_insert_with(|| {
            series.push(AirlineSeries::new(record.carrier));
            series.len() - 1
        });
        series[slot].buckets.push(bucket);
    }

    series
}

fn rank(series: &mut [AirlineSeries], grouping: GroupingMode) {
    match grouping {
        // sort_by is stable, so ties keep first-appearance order
        GroupingMode::Ungrouped => {
            series.sort_by(|a, b| b.on_time_percentage().total_cmp(&a.on_time_percentage()))
        }
        GroupingMode::ByDay | GroupingMode::ByMonth => {
            series.sort_by(|a, b| a.airline.cmp(&b.airline))
        }
    }
}
