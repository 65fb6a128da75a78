//! Application-level error type returned by handlers.
//!
//! All variants serialise to the [`ErrorResponse`] JSON format and map to
//! the appropriate HTTP status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ddvalidator::InspectError;
use ddvalidator_node_api::{error::codes, ErrorResponse};

use crate::store::StoreError;

pub const UNSAFE_CONTENT_MESSAGE: &str =
    "Content is not XML, or contains possible unsafe content which could result in an XSS attack.";

/// An error that a handler can return; converts directly to an HTTP response.
#[derive(Debug)]
pub enum AppError {
    InvalidUrl,
    UnknownVersion { version: String, base: String },
    SourceUnavailable(String),
    UnsafeContent,
    Schema(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::InvalidUrl => (
                StatusCode::BAD_REQUEST,
                codes::INVALID_URL,
                "Invalid URL".to_string(),
            ),
            AppError::UnknownVersion { version, base } => (
                StatusCode::BAD_REQUEST,
                codes::UNKNOWN_VERSION,
                format!("Unknown version: {version}. Check {base}/versions for supported versions."),
            ),
            AppError::SourceUnavailable(msg) => {
                (StatusCode::BAD_REQUEST, codes::SOURCE_UNAVAILABLE, msg)
            }
            AppError::UnsafeContent => (
                StatusCode::BAD_REQUEST,
                codes::UNSAFE_CONTENT,
                UNSAFE_CONTENT_MESSAGE.to_string(),
            ),
            AppError::Schema(msg) => (StatusCode::UNPROCESSABLE_ENTITY, codes::SCHEMA_ERROR, msg),
            AppError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, codes::INTERNAL_ERROR, msg)
            }
        };
        let body = ErrorResponse::new(code, message);
        (status, Json(body)).into_response()
    }
}

/// Store failures reaching this conversion are server-side faults; handlers
/// turn a missing version into [`AppError::UnknownVersion`] themselves.
impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<InspectError> for AppError {
    fn from(e: InspectError) -> Self {
        AppError::Schema(e.to_string())
    }
}
