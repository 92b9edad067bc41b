// HTTP response utilities for JSON query results
use crate::application::error::QueryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

/// Serialize a query result. `None` becomes JSON `null` with status 200,
/// matching what clients get for malformed input.
pub fn json_response<T: Serialize>(result: Result<Option<T>, QueryError>) -> Response {
    match result {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => error_response(e),
    }
}

pub fn error_response(error: QueryError) -> Response {
    let (status, message) = match &error {
        QueryError::InvalidAirportCode | QueryError::InvalidSearchTerm => {
            return (StatusCode::OK, Json(serde_json::Value::Null)).into_response();
        }
        QueryError::Cancelled => {
            tracing::warn!("Query cancelled before completion");
            (StatusCode::SERVICE_UNAVAILABLE, "request cancelled")
        }
        QueryError::DataSource(e) => {
            tracing::error!("Error querying flight data: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        }
    };

    (status, Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_some_is_serialized() {
        let response = json_response(Ok(Some(vec![1, 2, 3])));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([1, 2, 3]));
    }

    #[tokio::test]
    async fn test_none_is_null() {
        let response = json_response::<Vec<u8>>(Ok(None));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_invalid_input_is_null() {
        let response = json_response::<Vec<u8>>(Err(QueryError::InvalidAirportCode));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_data_source_error_hides_details() {
        let response =
            json_response::<Vec<u8>>(Err(QueryError::DataSource(anyhow::anyhow!("secret dsn"))));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "internal server error" })
        );
    }

    #[tokio::test]
    async fn test_cancelled() {
        let response = json_response::<Vec<u8>>(Err(QueryError::Cancelled));
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
