// Flight statistics domain models
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

/// How flight records are bucketed in time before aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingMode {
    /// All available dates in one bucket per carrier
    Ungrouped,
    ByDay,
    ByMonth,
}

impl GroupingMode {
    /// Normalize a bucket's start date for this grouping. Monthly buckets
    /// always start on the first day of the month.
    pub fn period_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            GroupingMode::ByMonth => date.with_day(1).unwrap_or(date),
            GroupingMode::Ungrouped | GroupingMode::ByDay => date,
        }
    }
}

/// One row returned by the flight data source.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightAggregate {
    pub period_start: NaiveDate,
    /// Latest date contributing to the row
    pub period_end: NaiveDate,
    pub carrier: String,
    pub total_flights: u64,
    pub total_delays: u64,
}

/// Percentage of flights that were on time. Zero when there were no flights.
pub fn on_time_percentage(flights: u64, delays: u64) -> f64 {
    if flights == 0 {
        return 0.0;
    }

    (1.0 - delays as f64 / flights as f64) * 100.0
}

/// Flight and delay counts for one airline over one time window.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsBucket {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub flights: u64,
    pub delays: u64,
}

impl StatsBucket {
    pub fn on_time_percentage(&self) -> f64 {
        on_time_percentage(self.flights, self.delays)
    }
}

/// All buckets for a single airline, in time order.
#[derive(Debug, Clone, PartialEq)]
pub struct AirlineSeries {
    pub airline: String,
    pub buckets: Vec<StatsBucket>,
}

impl AirlineSeries {
    pub fn new(airline: String) -> Self {
        Self {
            airline,
            buckets: Vec::new(),
        }
    }

    pub fn total_flights(&self) -> u64 {
        self.buckets.iter().map(|b| b.flights).sum()
    }

    pub fn total_delays(&self) -> u64 {
        self.buckets.iter().map(|b| b.delays).sum()
    }

    pub fn on_time_percentage(&self) -> f64 {
        on_time_percentage(self.total_flights(), self.total_delays())
    }

    /// Latest date contributing to any bucket
    pub fn last_flight(&self) -> Option<NaiveDate> {
        self.buckets.iter().map(|b| b.end).max()
    }
}

/// Midnight UTC on `date`
pub fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// One row of the by-airline ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AirlineFlightStats {
    pub airline: String,
    pub total_flights: u64,
    pub on_time_percentage: f64,
    pub last_flight: DateTime<Utc>,
}

impl AirlineFlightStats {
    pub fn from_series(series: &AirlineSeries) -> Option<Self> {
        let last_flight = series.last_flight()?;
        Some(Self {
            airline: series.airline.clone(),
            total_flights: series.total_flights(),
            on_time_percentage: series.on_time_percentage(),
            last_flight: utc_midnight(last_flight),
        })
    }
}

/// One airline's daily or monthly series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightStatsByDate {
    pub airline: String,
    pub rows: Vec<FlightStatsByDateRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightStatsByDateRow {
    pub date: DateTime<Utc>,
    pub flights: u64,
    pub delays: u64,
    pub on_time_percentage: f64,
}

impl From<AirlineSeries> for FlightStatsByDate {
    fn from(series: AirlineSeries) -> Self {
        let rows = series
            .buckets
            .iter()
            .map(|bucket| FlightStatsByDateRow {
                date: utc_midnight(bucket.start),
                flights: bucket.flights,
                delays: bucket.delays,
                on_time_percentage: bucket.on_time_percentage(),
            })
            .collect();

        Self {
            airline: series.airline,
            rows,
        }
    }
}
