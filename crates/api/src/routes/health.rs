//! Health check endpoint handlers.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::response::Envelope;

/// Simple status response for liveness/readiness probes.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Body of the root endpoint.
#[derive(Debug, Serialize)]
pub struct RootData {
    pub testing: String,
}

/// `GET /api/`: confirms the server is up.
pub async fn root() -> Envelope<RootData> {
    Envelope::successful(RootData {
        testing: "server is running...".to_string(),
    })
}

/// Liveness probe endpoint.
///
/// Returns 200 OK if the process is running.
pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "alive".to_string(),
    })
}

/// Readiness probe endpoint.
///
/// Returns 200 OK if the database answers, 503 otherwise.
pub async fn ready(State(state): State<AppState>) -> Result<Json<StatusResponse>, ApiError> {
    sqlx::query("SELECT 1")
        .execute(&state.pool)
        .await
        .map_err(|e| ApiError::ServiceUnavailable(format!("Database unavailable: {}", e)))?;

    Ok(Json(StatusResponse {
        status: "ready".to_string(),
    }))
}
