//! Uniform JSON wrapper for every response:
//! `{"status": "success", "data": ...}` or `{"status": "fail"|"error", "message": ...}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    /// The caller sent something unacceptable.
    Fail,
    /// The server could not complete the request.
    Error,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self { status: Status::Success, data: Some(data), message: None }
    }
}

impl Envelope<()> {
    pub fn fail(message: impl Into<String>) -> Self {
        Self { status: Status::Fail, data: None, message: Some(message.into()) }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { status: Status::Error, data: None, message: Some(message.into()) }
    }
}

/// Successful response carrying `data` with the given status code.
pub struct Success<T> {
    code: StatusCode,
    data: T,
}

impl<T> Success<T> {
    pub fn ok(data: T) -> Self { Self { code: StatusCode::OK, data } }

    pub fn created(data: T) -> Self { Self { code: StatusCode::CREATED, data } }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        (self.code, Json(Envelope::success(self.data))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_omits_message() {
        let v = serde_json::to_value(Envelope::success(vec![1, 2])).unwrap();
        assert_eq!(v, json!({"status": "success", "data": [1, 2]}));
    }

    #[test]
    fn empty_list_is_still_present() {
        let v = serde_json::to_value(Envelope::success(Vec::<u8>::new())).unwrap();
        assert_eq!(v, json!({"status": "success", "data": []}));
    }

    #[test]
    fn fail_and_error_omit_data() {
        assert_eq!(
            serde_json::to_value(Envelope::<()>::fail("invalid id")).unwrap(),
            json!({"status": "fail", "message": "invalid id"})
        );
        assert_eq!(
            serde_json::to_value(Envelope::<()>::error("car not found")).unwrap(),
            json!({"status": "error", "message": "car not found"})
        );
    }

    #[test]
    fn success_response_uses_given_code() {
        assert_eq!(Success::created(1).into_response().status(), StatusCode::CREATED);
        assert_eq!(Success::ok(1).into_response().status(), StatusCode::OK);
    }
}
