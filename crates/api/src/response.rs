//! JSON envelope shared by every API response body.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const STATUS_SUCCESSFUL: &str = "successful";
pub const STATUS_FAILED: &str = "failed";

/// `{"status": "successful", "data": ...}`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn successful(data: T) -> Self {
        Self {
            status: STATUS_SUCCESSFUL,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
