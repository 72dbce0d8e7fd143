//! API error type with IntoResponse.
//!
//! Errors become the JSON error envelope with the status mapping clients
//! rely on: storage failures answer 400 with `{"error": ...}`, unknown ids
//! answer 404 with an empty body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::StoreError;

/// API error with automatic HTTP status mapping.
#[derive(Debug)]
pub enum ApiError {
    /// Unknown series id (404, empty body).
    NotFound,

    /// Malformed payload or parameters (400).
    Validation(String),

    /// Storage failure (400, logged). The underlying message travels in the
    /// error envelope.
    Store(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            Self::Store(err) => {
                tracing::error!("store error: {err}");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound,
            err => Self::Store(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::to_bytes;

    #[tokio::test]
    async fn not_found_is_404_with_empty_body() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn validation_is_400_with_envelope() {
        let response = ApiError::Validation("bad payload".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "bad payload");
    }

    #[tokio::test]
    async fn storage_failure_is_400_with_envelope() {
        let response = ApiError::Store(StoreError::Sqlx(sqlx::Error::PoolClosed)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(value["error"].as_str().unwrap().contains("database error"));
    }

    #[test]
    fn store_not_found_maps_to_not_found() {
        let err = ApiError::from(StoreError::NotFound { series_id: 7 });
        assert!(matches!(err, ApiError::NotFound));
    }
}
