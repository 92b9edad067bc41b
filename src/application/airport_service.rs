// Airport service - Use cases for airport lookup and search
use crate::application::error::{none_if_invalid, run_cancellable, QueryError};
use crate::application::flight_repository::AirportRepository;
use crate::domain::airport::Airport;
use crate::domain::validation::{is_airport_code, is_valid_search_term};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub struct AirportService {
    repository: Arc<dyn AirportRepository>,
}

impl AirportService {
    pub fn new(repository: Arc<dyn AirportRepository>) -> Self {
        Self { repository }
    }

    /// Find an airport by code. Malformed and unknown codes both yield `None`.
    pub async fn airport(
        &self,
        code: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Airport>, QueryError> {
        let code = code.to_ascii_uppercase();
        let found = if is_airport_code(&code) {
            run_cancellable(cancel, self.repository.lookup_airport(&code)).await
        } else {
            Err(QueryError::InvalidAirportCode)
        };

        Ok(none_if_invalid(found)?.flatten())
    }

    /// Airports whose name, city or code contains `term`.
    ///
    /// Returns `None` if the term has characters outside the allowed set.
    pub async fn airport_search(
        &self,
        term: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Vec<Airport>>, QueryError> {
        let found = if is_valid_search_term(term) {
            run_cancellable(cancel, self.repository.search_airports(term)).await
        } else {
            Err(QueryError::InvalidSearchTerm)
        };

        none_if_invalid(found)
    }
}
