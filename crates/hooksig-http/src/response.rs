//! JSON response construction and error formatting.

use crate::body::WebhookResponseBody;
use crate::error::MiddlewareError;

/// Content type for JSON responses.
pub const CONTENT_TYPE: &str = "application/json";

/// Serialize an error into the `{"message": ...}` body.
#[must_use]
pub fn error_to_json(error: &MiddlewareError) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({ "message": error.to_string() }))
        .expect("JSON serialization of error cannot fail")
}

/// Convert a [`MiddlewareError`] into a complete HTTP error response.
#[must_use]
pub fn error_to_response(error: &MiddlewareError) -> http::Response<WebhookResponseBody> {
    http::Response::builder()
        .status(error.status_code())
        .header(http::header::CONTENT_TYPE, CONTENT_TYPE)
        .body(WebhookResponseBody::from_json(error_to_json(error)))
        .expect("valid error response")
}

/// Build a JSON response with the given status.
#[must_use]
pub fn json_response(
    status: http::StatusCode,
    value: &serde_json::Value,
) -> http::Response<WebhookResponseBody> {
    let json = serde_json::to_vec(value).expect("JSON serialization of a Value cannot fail");
    http::Response::builder()
        .status(status)
        .header(http::header::CONTENT_TYPE, CONTENT_TYPE)
        .body(WebhookResponseBody::from_json(json))
        .expect("valid JSON response")
}
