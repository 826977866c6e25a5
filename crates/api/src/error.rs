use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use domain::services::CatalogError;
use serde::Serialize;
use thiserror::Error;

use crate::response::STATUS_FAILED;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
            }
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg)
            }
        };

        let body = ErrorBody {
            status: STATUS_FAILED,
            error: error_code.into(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Turns errors raised by tower middleware into the failed-error body.
///
/// A request that outlives the request timeout is reported like any other
/// store failure.
pub async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        ApiError::Internal("request did not complete within the request timeout".to_string())
    } else {
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_api_error_internal_exposes_message() {
        let response = ApiError::Internal("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["status"], "failed");
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["message"], "connection refused");
    }

    #[test]
    fn test_api_error_not_found() {
        let response = ApiError::NotFound("no such route".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_api_error_service_unavailable() {
        let response = ApiError::ServiceUnavailable("database down".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_from_catalog_error_keeps_message() {
        let err: ApiError = CatalogError::Count(sqlx::Error::PoolClosed).into();
        match err {
            ApiError::Internal(msg) => assert!(msg.starts_with("failed counting products")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_elapsed_request_is_internal_error() {
        let err: BoxError = Box::new(tower::timeout::error::Elapsed::new());
        let response = handle_middleware_error(err).await.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["status"], "failed");
        assert_eq!(body["error"], "internal_error");
        assert!(body["message"].as_str().unwrap().contains("request timeout"));
    }

    #[tokio::test]
    async fn test_other_middleware_error_keeps_message() {
        let err: BoxError = "layer failed".into();
        match handle_middleware_error(err).await {
            ApiError::Internal(msg) => assert_eq!(msg, "layer failed"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            ApiError::Internal("boom".to_string()).to_string(),
            "Internal error: boom"
        );
        assert_eq!(
            ApiError::NotFound("x".to_string()).to_string(),
            "Not found: x"
        );
    }
}
