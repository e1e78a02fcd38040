use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::error;

use crate::envelope::Envelope;

/// Error response rendered with the envelope: `Fail` for caller mistakes,
/// `Error` for everything the caller cannot fix.
#[derive(Debug)]
pub enum ApiError {
    Fail(StatusCode, String),
    Error(StatusCode, String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Fail(StatusCode::BAD_REQUEST, message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Error(StatusCode::NOT_FOUND, message.into())
    }

    pub fn method_not_allowed() -> Self {
        Self::Error(StatusCode::METHOD_NOT_ALLOWED, "method not allowed".into())
    }

    /// Map a service failure to a response. Storage details are logged and
    /// replaced by `context`.
    pub fn from_service(err: ServiceError, context: &'static str) -> Self {
        match err {
            ServiceError::Validation(_) => Self::bad_request(err.to_string()),
            ServiceError::NotFound(message) => Self::not_found(message),
            ServiceError::Storage(detail) => {
                error!(error = %detail, "{context}");
                Self::Error(StatusCode::INTERNAL_SERVER_ERROR, context.to_string())
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Fail(code, _) | Self::Error(code, _) => *code,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Fail(code, message) => (code, Json(Envelope::<()>::fail(message))).into_response(),
            Self::Error(code, message) => (code, Json(Envelope::<()>::error(message))).into_response(),
        }
    }
}
