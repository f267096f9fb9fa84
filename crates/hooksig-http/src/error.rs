//! Errors surfaced by the signed-request middleware.

use hooksig_auth::{VerifyError, WebhookSignatureError};
use http::StatusCode;

/// A failure raised while admitting a webhook request.
#[derive(Debug, thiserror::Error)]
pub enum MiddlewareError {
    /// Signature verification failed.
    #[error(transparent)]
    Verify(#[from] VerifyError),

    /// The request body could not be read from the connection.
    #[error("failed to read request body: {0}")]
    BodyRead(String),

    /// The verified body could not be parsed as JSON.
    #[error("request body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl MiddlewareError {
    /// The wrapped signature error, if this is one.
    #[must_use]
    pub fn signature_error(&self) -> Option<&WebhookSignatureError> {
        match self {
            Self::Verify(err) => err.as_signature_error(),
            _ => None,
        }
    }

    /// Whether this is a format or value signature error.
    #[must_use]
    pub fn is_signature_error(&self) -> bool {
        self.signature_error().is_some()
    }

    /// The HTTP status code to answer with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Verify(VerifyError::Signature(err)) => err.status_code(),
            Self::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Self::Verify(_) | Self::BodyRead(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<WebhookSignatureError> for MiddlewareError {
    fn from(err: WebhookSignatureError) -> Self {
        Self::Verify(err.into())
    }
}
