// SQLite repository implementation
use crate::application::flight_repository::{AirportRepository, FlightRepository};
use crate::domain::airport::Airport;
use crate::domain::flight_stats::{FlightAggregate, GroupingMode};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row};
use std::path::{Path, PathBuf};

/// Reads the `flights_day`, `carriers` and `airports` tables.
///
/// Every query opens its own read-only connection on the blocking pool, so
/// concurrent requests never wait on each other here.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    path: PathBuf,
}

impl SqliteRepository {
    /// Check that the database can be opened and return a repository for it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        Self::connect(&path)?;
        Ok(Self { path })
    }

    fn connect(path: &Path) -> Result<Connection> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open flights database {}", path.display()))?;
        register_unicode_lower(&conn)?;
        Ok(conn)
    }

    async fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = Self::connect(&path)?;
            f(&conn)
        })
        .await
        .context("SQLite query task failed")?
    }
}

/// SQLite's `lower()` and `LIKE` only fold ASCII, so airport search lowercases
/// through Rust instead.
fn register_unicode_lower(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "unicode_lower",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|s| s.to_lowercase())),
    )
    .context("Failed to register unicode_lower")
}

/// Build the aggregation query for a grouping mode. Grouped results are
/// ordered by period, then by airline name.
fn aggregate_query(grouping: GroupingMode) -> String {
    let (group_by, order_by) = match grouping {
        GroupingMode::Ungrouped => ("carriers.name", "carriers.name"),
        GroupingMode::ByDay => (
            "carriers.name, flights_day.date",
            "flights_day.date, carriers.name",
        ),
        GroupingMode::ByMonth => (
            "carriers.name, strftime('%Y-%m', flights_day.date)",
            "strftime('%Y-%m', flights_day.date), carriers.name",
        ),
    };

    format!(
        "SELECT
            MIN(flights_day.date),
            MAX(flights_day.date),
            carriers.name,
            SUM(flights_day.total_flights),
            SUM(COALESCE(flights_day.delayed_flights, 0))
        FROM
            flights_day
            INNER JOIN carriers ON flights_day.carrier = carriers.code
        WHERE flights_day.origin = ?1 AND flights_day.destination = ?2
        GROUP BY {group_by}
        ORDER BY {order_by}"
    )
}

fn aggregate_from_row(row: &Row<'_>) -> rusqlite::Result<FlightAggregate> {
    Ok(FlightAggregate {
        period_start: row.get::<_, NaiveDate>(0)?,
        period_end: row.get::<_, NaiveDate>(1)?,
        carrier: row.get(2)?,
        total_flights: count(row.get(3)?),
        total_delays: count(row.get(4)?),
    })
}

fn count(value: Option<i64>) -> u64 {
    value.unwrap_or(0).max(0) as u64
}

const AIRPORT_COLUMNS: &str = "code, name, city, state, lat, lng";

fn airport_from_row(row: &Row<'_>) -> rusqlite::Result<Airport> {
    Ok(Airport {
        code: row.get(0)?,
        name: row.get(1)?,
        city: row.get(2)?,
        state: row.get(3)?,
        latitude: row.get(4)?,
        longitude: row.get(5)?,
    })
}

#[async_trait]
impl FlightRepository for SqliteRepository {
    async fn query_flight_aggregates(
        &self,
        origin: &str,
        destination: &str,
        grouping: GroupingMode,
    ) -> Result<Vec<FlightAggregate>> {
        let origin = origin.to_string();
        let destination = destination.to_string();
        let query = aggregate_query(grouping);

        tracing::debug!("Executing flight aggregate query for {} -> {}", origin, destination);

        self.with_connection(move |conn| {
            let mut stmt = conn
                .prepare(&query)
                .context("Failed to prepare flight aggregate query")?;
            let rows = stmt
                .query_map([&origin, &destination], aggregate_from_row)
                .context("Failed to run flight aggregate query")?
                .collect::<rusqlite::Result<Vec<_>>>()
                .context("Failed to read flight aggregate row")?;
            Ok(rows)
        })
        .await
    }
}

#[async_trait]
impl AirportRepository for SqliteRepository {
    async fn lookup_airport(&self, code: &str) -> Result<Option<Airport>> {
        let code = code.to_string();
        self.with_connection(move |conn| {
            conn.query_row(
                &format!("SELECT {AIRPORT_COLUMNS} FROM airports WHERE is_active = 1 AND code = ?1"),
                [&code],
                airport_from_row,
            )
            .optional()
            .with_context(|| format!("Failed to fetch airport {code}"))
        })
        .await
    }

    async fn search_airports(&self, term: &str) -> Result<Vec<Airport>> {
        let needle = term.to_lowercase();
        self.with_connection(move |conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {AIRPORT_COLUMNS} FROM airports
                    WHERE is_active = 1 AND (
                        instr(unicode_lower(name), ?1) > 0 OR
                        instr(unicode_lower(city), ?1) > 0 OR
                        instr(unicode_lower(code), ?1) > 0
                    )
                    ORDER BY code"
                ))
                .context("Failed to prepare airport search")?;
            let airports = stmt
                .query_map([&needle], airport_from_row)
                .context("Failed to run airport search")?
                .collect::<rusqlite::Result<Vec<_>>>()
                .context("Failed to read airport row")?;
            tracing::debug!("Airport search matched {} rows", airports.len());
            Ok(airports)
        })
        .await
    }
}
