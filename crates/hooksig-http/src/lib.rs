//! Signed-request HTTP middleware for Hooksig.
//!
//! This crate puts webhook signature verification in front of a hyper
//! service, providing:
//!
//! - **Service**: Hyper `Service` that verifies `sanity-webhook-signature` against the raw body
//! - **Handler trait**: Defines the boundary between the middleware and business logic,
//!   plus an `EchoHandler` that replies with the verified payload
//! - **Config**: Secret plus the `parse_body` and `respond_on_error` options
//! - **Response helpers**: JSON success and `{"message": ...}` error formatting

pub mod body;
pub mod config;
pub mod error;
pub mod handler;
pub mod response;
pub mod service;

pub use body::WebhookResponseBody;
pub use config::SignedRequestConfig;
pub use error::MiddlewareError;
pub use handler::{EchoHandler, HandlerFuture, WebhookHandler, WebhookPayload};
pub use service::SignedRequestService;
