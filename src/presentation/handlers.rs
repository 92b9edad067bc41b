// HTTP request handlers
use crate::infrastructure::http_response::json_response;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub term: Option<String>,
}

/// Cancellation token that fires once the request timeout passes, or when
/// the handler is dropped.
struct Deadline {
    cancel: CancellationToken,
    timer: JoinHandle<()>,
}

impl Deadline {
    fn start(timeout: Duration) -> Self {
        let cancel = CancellationToken::new();
        let expiry = cancel.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            expiry.cancel();
        });
        Self { cancel, timer }
    }

    fn token(&self) -> &CancellationToken {
        &self.cancel
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        self.timer.abort();
        self.cancel.cancel();
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Look up one airport by code
pub async fn get_airport(
    Path(code): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let deadline = Deadline::start(state.request_timeout);
    json_response(state.airport_service.airport(&code, deadline.token()).await)
}

/// Search airports by name, city or code
pub async fn search_airports(
    Query(query): Query<SearchQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let term = query.term.unwrap_or_default();
    let deadline = Deadline::start(state.request_timeout);
    json_response(
        state
            .airport_service
            .airport_search(&term, deadline.token())
            .await,
    )
}

/// Airlines on a route ranked by on-time percentage
pub async fn flight_stats_by_airline(
    Path((origin, destination)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let deadline = Deadline::start(state.request_timeout);
    json_response(
        state
            .flight_stats_service
            .flight_stats_by_airline(&origin, &destination, deadline.token())
            .await,
    )
}

pub async fn daily_flight_stats(
    Path((origin, destination)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let deadline = Deadline::start(state.request_timeout);
    json_response(
        state
            .flight_stats_service
            .daily_flight_stats(&origin, &destination, deadline.token())
            .await,
    )
}

pub async fn monthly_flight_stats(
    Path((origin, destination)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let deadline = Deadline::start(state.request_timeout);
    json_response(
        state
            .flight_stats_service
            .monthly_flight_stats(&origin, &destination, deadline.token())
            .await,
    )
}
