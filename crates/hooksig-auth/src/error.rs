//! Error types for webhook signature verification.
//!
//! Signature failures are split into two kinds, mirrored by [`ErrorKind`]:
//!
//! - **Format** errors: the signature material is syntactically unusable
//!   (missing or malformed header, bad secret/payload/timestamp). Status 400.
//! - **Value** errors: the material is well formed but does not match, or the
//!   request carried no signature at all. Status 401.
//!
//! [`VerifyError`] wraps [`WebhookSignatureError`] together with the failures
//! that are *not* signature errors, such as a body that was parsed before it
//! reached the verifier.

use http::StatusCode;

/// The two kinds of signature error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The signature input is syntactically invalid.
    Format,
    /// The signature input is well formed but wrong or absent.
    Value,
}

impl ErrorKind {
    /// The machine-checkable discriminant tag for this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Format => "WebhookSignatureFormatError",
            Self::Value => "WebhookSignatureValueError",
        }
    }

    /// The HTTP status code conventionally used for this kind.
    #[must_use]
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::Format => StatusCode::BAD_REQUEST,
            Self::Value => StatusCode::UNAUTHORIZED,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed signature verification failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WebhookSignatureError {
    /// The signature header is empty.
    #[error("Missing or empty signature header")]
    MissingHeader,

    /// The signature header does not match `t=<timestamp>,v1=<hash>`.
    #[error("Invalid signature payload format")]
    InvalidFormat,

    /// The request carried more than one signature header.
    #[error("Multiple signature headers received")]
    MultipleHeaders,

    /// The request has no body at all.
    #[error("Request contained no parsed request body")]
    MissingBody,

    /// The secret used to sign is empty.
    #[error("Invalid secret provided")]
    InvalidSecret,

    /// The payload to sign is empty.
    #[error("Can not create signature for empty payload")]
    EmptyPayload,

    /// The timestamp is below the minimum or not representable.
    #[error("Invalid signature timestamp, must be a unix timestamp with millisecond precision")]
    InvalidTimestamp,

    /// The recomputed signature header differs from the received one.
    #[error("Signature is invalid")]
    SignatureMismatch,

    /// The request carried no usable signature header.
    #[error("Request contained no signature header")]
    NoSignatureHeader,
}

impl WebhookSignatureError {
    /// Which of the two signature error kinds this is.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SignatureMismatch | Self::NoSignatureHeader => ErrorKind::Value,
            Self::MissingHeader
            | Self::InvalidFormat
            | Self::MultipleHeaders
            | Self::MissingBody
            | Self::InvalidSecret
            | Self::EmptyPayload
            | Self::InvalidTimestamp => ErrorKind::Format,
        }
    }

    /// The discriminant tag, e.g. `"WebhookSignatureValueError"`.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        self.kind().as_str()
    }

    /// The HTTP status code to answer with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.kind().status_code()
    }
}

/// Any failure raised while verifying a signature or a request.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// A format or value error in the signature material.
    #[error(transparent)]
    Signature(#[from] WebhookSignatureError),

    /// The request body was already parsed into a structured value.
    #[error(
        "request body was not a string/buffer; verifying a signature requires the raw, \
         unparsed body since re-serializing parsed JSON is not guaranteed to reproduce \
         the signed bytes"
    )]
    UnexpectedBody,

    /// The signing backend failed to produce a digest.
    #[error("signing backend failure: {0}")]
    Signer(String),
}

impl VerifyError {
    /// Whether this is one of the two typed signature errors.
    #[must_use]
    pub fn is_signature_error(&self) -> bool {
        matches!(self, Self::Signature(_))
    }

    /// The wrapped signature error, if any.
    #[must_use]
    pub fn as_signature_error(&self) -> Option<&WebhookSignatureError> {
        match self {
            Self::Signature(err) => Some(err),
            _ => None,
        }
    }
}

/// Convenience result type for verification operations.
pub type VerifyResult<T> = Result<T, VerifyError>;
