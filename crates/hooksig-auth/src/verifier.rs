//! Verification of whole webhook requests.
//!
//! [`verify_request`] pulls the signature header and the raw body out of a
//! [`ConnectLikeRequest`], checks the preconditions, and hands the body text to
//! the signature codec. Preconditions, in order:
//!
//! 1. At most one signature header (`MultipleHeaders`, a format error).
//! 2. A textual signature header (`NoSignatureHeader`, a value error).
//! 3. A body (`MissingBody`, a format error).
//! 4. A raw text or byte body. A body that was already parsed into a structured
//!    value is rejected with [`VerifyError::UnexpectedBody`] and is never
//!    re-serialized.

use std::borrow::Cow;

use tracing::warn;

use crate::codec::SignatureCodec;
use crate::error::{VerifyError, VerifyResult, WebhookSignatureError};
use crate::request::{ConnectLikeRequest, HeaderField, RequestBody, SIGNATURE_HEADER_NAME};
use crate::signer::Signer;

impl<S: Signer> SignatureCodec<S> {
    /// Verify the signature of a webhook request.
    ///
    /// # Errors
    ///
    /// Signature errors for a missing, duplicated or wrong signature or a
    /// missing body; [`VerifyError::UnexpectedBody`] for a pre-parsed body.
    pub async fn verify_request<R>(&self, request: &R, secret: &str) -> VerifyResult<()>
    where
        R: ConnectLikeRequest + ?Sized,
    {
        let header = match request.header_field(SIGNATURE_HEADER_NAME) {
            HeaderField::Single(value) => value,
            HeaderField::Multiple(values) => {
                warn!(
                    count = values.len(),
                    "rejecting webhook with multiple signature headers"
                );
                return Err(WebhookSignatureError::MultipleHeaders.into());
            }
            HeaderField::Missing | HeaderField::NotText => {
                return Err(WebhookSignatureError::NoSignatureHeader.into());
            }
        };

        let payload: Cow<'_, str> = match request.raw_body() {
            None => return Err(WebhookSignatureError::MissingBody.into()),
            Some(RequestBody::Text(text)) => Cow::Borrowed(text),
            Some(RequestBody::Bytes(bytes)) => String::from_utf8_lossy(bytes),
            Some(RequestBody::Parsed(_)) => {
                warn!("webhook body was parsed before signature verification");
                return Err(VerifyError::UnexpectedBody);
            }
        };

        self.verify_signature(&payload, header, secret).await
    }

    /// Boolean form of [`verify_request`](Self::verify_request).
    ///
    /// Signature errors become `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Any failure that is not a signature error, including
    /// [`VerifyError::UnexpectedBody`].
    pub async fn is_valid_request<R>(&self, request: &R, secret: &str) -> VerifyResult<bool>
    where
        R: ConnectLikeRequest + ?Sized,
    {
        match self.verify_request(request, secret).await {
            Ok(()) => Ok(true),
            Err(err) if err.is_signature_error() => Ok(false),
            Err(err) => Err(err),
        }
    }
}

/// Verify a webhook request with the default HMAC-SHA256 signer.
///
/// # Errors
///
/// See [`SignatureCodec::verify_request`].
///
/// # Examples
///
/// ```
/// use hooksig_auth::{SIGNATURE_HEADER_NAME, verify_request};
///
/// # tokio_test::block_on(async {
/// let request = http::Request::builder()
///     .header(SIGNATURE_HEADER_NAME, "t=1633519811129,v1=tLa470fx7qkLLEcMOcEUFuBbRSkGujyskxrNXcoh0N0")
///     .body(r#"{"_id":"resume"}"#.to_owned())
///     .unwrap();
///
/// assert!(verify_request(&request, "test").await.is_ok());
/// # });
/// ```
pub async fn verify_request<R>(request: &R, secret: &str) -> VerifyResult<()>
where
    R: ConnectLikeRequest + ?Sized,
{
    let codec: SignatureCodec = SignatureCodec::default();
    codec.verify_request(request, secret).await
}

/// Boolean form of [`verify_request`].
///
/// # Errors
///
/// See [`SignatureCodec::is_valid_request`].
pub async fn is_valid_request<R>(request: &R, secret: &str) -> VerifyResult<bool>
where
    R: ConnectLikeRequest + ?Sized,
{
    let codec: SignatureCodec = SignatureCodec::default();
    codec.is_valid_request(request, secret).await
}
