//! API error type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use metalookup_store::StoreError;
use tracing::error;

/// Error rendered as a JSON `{"message": ...}` body.
///
/// Error responses never carry a `Cache-Control` header.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "message": self.message });
        (self.status, axum::Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        error!("Metadata store failure: {}", e);
        Self::internal("metadata store unavailable")
    }
}
