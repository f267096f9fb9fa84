//! The application boundary behind the middleware.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::body::WebhookResponseBody;
use crate::error::MiddlewareError;
use crate::response::{error_to_response, json_response};

/// Future returned by [`WebhookHandler`] methods.
pub type HandlerFuture = Pin<Box<dyn Future<Output = http::Response<WebhookResponseBody>> + Send>>;

/// A verified webhook body.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookPayload {
    /// The raw body, when body parsing is disabled.
    Raw(Bytes),
    /// The body parsed as JSON.
    Json(serde_json::Value),
}

/// Trait that the webhook business logic must implement.
///
/// [`handle`](Self::handle) only ever sees requests whose signature has been
/// verified. [`handle_error`](Self::handle_error) is the generic error path:
/// it receives every failure the middleware does not answer itself.
pub trait WebhookHandler: Send + Sync + 'static {
    /// Handle a verified webhook request.
    fn handle(&self, request: http::Request<WebhookPayload>) -> HandlerFuture;

    /// Handle a failure forwarded by the middleware.
    ///
    /// The default answers with the error's status code and `{"message": ...}`.
    fn handle_error(&self, error: MiddlewareError) -> HandlerFuture {
        let response = error_to_response(&error);
        Box::pin(async move { response })
    }
}

/// Handler that echoes verified payloads back to the sender.
///
/// Verified requests get `{"success": true, "payload": ...}`, with raw bodies
/// echoed as a JSON string. Forwarded failures get
/// `{"message": ..., "success": false}` with the error's status code.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoHandler;

impl WebhookHandler for EchoHandler {
    fn handle(&self, request: http::Request<WebhookPayload>) -> HandlerFuture {
        let (parts, body) = request.into_parts();
        let payload = match body {
            WebhookPayload::Json(value) => value,
            WebhookPayload::Raw(bytes) => {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            }
        };
        info!(method = %parts.method, uri = %parts.uri, "received webhook");

        let response = json_response(
            http::StatusCode::OK,
            &json!({ "success": true, "payload": payload }),
        );
        Box::pin(async move { response })
    }

    fn handle_error(&self, error: MiddlewareError) -> HandlerFuture {
        warn!(error = %error, "webhook rejected");

        let response = json_response(
            error.status_code(),
            &json!({ "message": error.to_string(), "success": false }),
        );
        Box::pin(async move { response })
    }
}
