//! The signed-request middleware implementing hyper's `Service` trait.
//!
//! [`SignedRequestService`] sits in front of a [`WebhookHandler`] and admits
//! only requests that carry a valid signature. For every request it:
//!
//! 1. Collects the raw body.
//! 2. Verifies the `sanity-webhook-signature` header against it.
//! 3. Optionally parses the body as JSON.
//! 4. Hands the request to the handler, or applies the error policy.
//! 5. Adds an `x-request-id` header to the response.
//!
//! With `respond_on_error` set, signature errors are answered directly with
//! their status code and `{"message": ...}`. Every other failure, and every
//! failure when `respond_on_error` is unset, goes to
//! [`WebhookHandler::handle_error`].

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::service::Service;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use hooksig_auth::SignatureCodec;

use crate::body::WebhookResponseBody;
use crate::config::SignedRequestConfig;
use crate::error::MiddlewareError;
use crate::handler::{WebhookHandler, WebhookPayload};
use crate::response::error_to_response;

/// Hyper `Service` that verifies webhook signatures before dispatching.
///
/// # Type Parameters
///
/// - `H`: The business logic handler implementing [`WebhookHandler`].
#[derive(Debug)]
pub struct SignedRequestService<H: WebhookHandler> {
    handler: Arc<H>,
    config: Arc<SignedRequestConfig>,
    codec: SignatureCodec,
}

impl<H: WebhookHandler> SignedRequestService<H> {
    /// Create a new service with the given handler and configuration.
    #[must_use]
    pub fn new(handler: H, config: SignedRequestConfig) -> Self {
        Self::from_shared(Arc::new(handler), config)
    }

    /// Create a new service from an `Arc<H>` handler and configuration.
    #[must_use]
    pub fn from_shared(handler: Arc<H>, config: SignedRequestConfig) -> Self {
        Self {
            handler,
            config: Arc::new(config),
            codec: SignatureCodec::default(),
        }
    }
}

impl<H: WebhookHandler> Clone for SignedRequestService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            config: Arc::clone(&self.config),
            codec: self.codec.clone(),
        }
    }
}

impl<H, B> Service<http::Request<B>> for SignedRequestService<H>
where
    H: WebhookHandler,
    B: http_body::Body + Send + 'static,
    B::Data: Send,
    B::Error: std::fmt::Display,
{
    type Response = http::Response<WebhookResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<B>) -> Self::Future {
        let service = self.clone();
        let request_id = Uuid::new_v4().to_string();

        Box::pin(async move {
            let response = service.process_request(req, &request_id).await;
            Ok(add_common_headers(response, &request_id))
        })
    }
}

impl<H: WebhookHandler> SignedRequestService<H> {
    /// Process a single webhook request through the middleware pipeline.
    async fn process_request<B>(
        &self,
        req: http::Request<B>,
        request_id: &str,
    ) -> http::Response<WebhookResponseBody>
    where
        B: http_body::Body,
        B::Error: std::fmt::Display,
    {
        let method = req.method().clone();
        let uri = req.uri().clone();
        debug!(%method, %uri, request_id, "processing webhook request");

        // 1. Collect body.
        let (parts, incoming) = req.into_parts();
        let body = match collect_body(incoming).await {
            Ok(body) => body,
            Err(err) => {
                error!(error = %err, request_id, "failed to collect webhook body");
                return self.reject(err, request_id).await;
            }
        };

        // 2. Verify the signature against the raw body.
        let req = http::Request::from_parts(parts, body);
        if let Err(err) = self
            .codec
            .verify_request(&req, &self.config.secret)
            .await
        {
            warn!(error = %err, request_id, "webhook signature rejected");
            return self.reject(err.into(), request_id).await;
        }

        info!(%method, %uri, request_id, "verified webhook signature");

        // 3. Optionally parse the body.
        let (parts, body) = req.into_parts();
        let payload = if self.config.parse_body {
            match serde_json::from_slice(&body) {
                Ok(value) => WebhookPayload::Json(value),
                Err(err) => {
                    warn!(error = %err, request_id, "verified webhook body is not JSON");
                    return self.reject(err.into(), request_id).await;
                }
            }
        } else {
            WebhookPayload::Raw(body)
        };

        // 4. Dispatch to handler.
        self.handler
            .handle(http::Request::from_parts(parts, payload))
            .await
    }

    /// Apply the error policy to a failed request.
    async fn reject(
        &self,
        err: MiddlewareError,
        request_id: &str,
    ) -> http::Response<WebhookResponseBody> {
        if self.config.respond_on_error && err.is_signature_error() {
            debug!(status = %err.status_code(), request_id, "answering signature error");
            return error_to_response(&err);
        }
        self.handler.handle_error(err).await
    }
}

/// Collect the full request body into `Bytes`.
async fn collect_body<B>(incoming: B) -> Result<Bytes, MiddlewareError>
where
    B: http_body::Body,
    B::Error: std::fmt::Display,
{
    incoming
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .map_err(|e| MiddlewareError::BodyRead(e.to_string()))
}

/// Add common response headers to every webhook response.
fn add_common_headers(
    mut response: http::Response<WebhookResponseBody>,
    request_id: &str,
) -> http::Response<WebhookResponseBody> {
    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        response.headers_mut().entry("x-request-id").or_insert(hv);
    }
    response
}
