// Errors surfaced by the query use cases
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid airport code")]
    InvalidAirportCode,

    #[error("invalid search term")]
    InvalidSearchTerm,

    #[error("data source error: {0:#}")]
    DataSource(#[source] anyhow::Error),

    #[error("request cancelled")]
    Cancelled,
}

impl QueryError {
    /// Validation failures mean "no result" rather than a server failure.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            QueryError::InvalidAirportCode | QueryError::InvalidSearchTerm
        )
    }
}

/// Turn validation failures into "no result", keep every other error.
pub fn none_if_invalid<T>(result: Result<T, QueryError>) -> Result<Option<T>, QueryError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_invalid_input() => {
            tracing::debug!("Rejected query input: {}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Run a data-source future, giving up as soon as `cancel` fires.
pub async fn run_cancellable<T, F>(
    cancel: &tokio_util::sync::CancellationToken,
    query: F,
) -> Result<T, QueryError>
where
    F: std::future::Future<Output = anyhow::Result<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(QueryError::Cancelled),
        result = query => result.map_err(QueryError::DataSource),
    }
}
