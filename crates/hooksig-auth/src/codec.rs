//! Signature header encoding, decoding and verification.
//!
//! A signature header has the form:
//!
//! ```text
//! t=<unix timestamp in milliseconds>,v1=<base64url(HMAC-SHA256(secret, "<t>.<payload>"))>
//! ```
//!
//! Verification is a strict string comparison: the received header is decoded
//! only to recover its timestamp, the canonical header is recomputed from the
//! payload, timestamp and secret, and the two strings must be identical. A
//! header with extra whitespace that the decoder tolerates therefore does not
//! verify.
//!
//! The main entry points are [`encode_signature_header`],
//! [`decode_signature_header`] and [`verify_signature`]. Each is also available
//! on [`SignatureCodec`] for callers that supply their own [`Signer`].

use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as BASE64_URL;
use regex::Regex;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::error::{VerifyResult, WebhookSignatureError};
use crate::signer::{HmacSha256Signer, Signer};

/// Earliest accepted timestamp: 2021-01-01T00:00:00.000Z in epoch milliseconds.
///
/// Payloads were not signed before this date, so anything older is either a
/// legacy format or a timestamp in the wrong unit (seconds).
pub const MINIMUM_TIMESTAMP: u64 = 1_609_459_200_000;

static SIGNATURE_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^t=([0-9]+)[, ]+v1=([^, ]+)$").expect("signature header pattern is valid")
});

/// A decoded signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSignature {
    /// The time the signature was created, in epoch milliseconds.
    pub timestamp: u64,
    /// The base64url-encoded hash, exactly as received.
    pub hashed_payload: String,
}

/// Decode a signature header into its timestamp and hash.
///
/// Surrounding whitespace is ignored and the two fields may be separated by any
/// run of commas and spaces. The timestamp is not range-checked here.
///
/// # Errors
///
/// - [`WebhookSignatureError::MissingHeader`] if `header` is empty.
/// - [`WebhookSignatureError::InvalidFormat`] if it is not `t=<digits>,v1=<hash>`,
///   or if the digits do not fit in a `u64`.
///
/// # Examples
///
/// ```
/// use hooksig_auth::codec::decode_signature_header;
///
/// let decoded =
///     decode_signature_header("t=1633470609222, v1=7kTYPaw6SmCoN2VJzFL24oEjV-ac7lRwbljOkh7d13A")
///         .unwrap();
/// assert_eq!(decoded.timestamp, 1_633_470_609_222);
/// assert_eq!(decoded.hashed_payload, "7kTYPaw6SmCoN2VJzFL24oEjV-ac7lRwbljOkh7d13A");
/// ```
pub fn decode_signature_header(header: &str) -> Result<DecodedSignature, WebhookSignatureError> {
    if header.is_empty() {
        return Err(WebhookSignatureError::MissingHeader);
    }

    let captures = SIGNATURE_HEADER_REGEX
        .captures(header.trim())
        .ok_or(WebhookSignatureError::InvalidFormat)?;

    let (Some(timestamp), Some(hashed_payload)) = (captures.get(1), captures.get(2)) else {
        return Err(WebhookSignatureError::InvalidFormat);
    };

    // No range check beyond what `u64` can hold. Digits past that cannot name a
    // real millisecond timestamp, so the header is malformed rather than stale.
    let timestamp = timestamp
        .as_str()
        .parse::<u64>()
        .map_err(|_| WebhookSignatureError::InvalidFormat)?;

    Ok(DecodedSignature {
        timestamp,
        hashed_payload: hashed_payload.as_str().to_owned(),
    })
}

/// Encodes and verifies signature headers using a pluggable [`Signer`].
///
/// The default codec computes HMAC-SHA256 in-process.
#[derive(Debug, Clone, Default)]
pub struct SignatureCodec<S = HmacSha256Signer> {
    signer: S,
}

impl<S: Signer> SignatureCodec<S> {
    /// Create a codec backed by the given signer.
    #[must_use]
    pub fn new(signer: S) -> Self {
        Self { signer }
    }

    /// Compute the base64url (unpadded) signature of `payload` at `timestamp`.
    ///
    /// # Errors
    ///
    /// Format errors, checked in this order:
    /// [`InvalidSecret`](WebhookSignatureError::InvalidSecret) for an empty secret,
    /// [`EmptyPayload`](WebhookSignatureError::EmptyPayload) for an empty payload,
    /// [`InvalidTimestamp`](WebhookSignatureError::InvalidTimestamp) for a timestamp
    /// below [`MINIMUM_TIMESTAMP`]. Signer failures are propagated as-is.
    pub async fn compute_signature(
        &self,
        payload: &str,
        timestamp: u64,
        secret: &str,
    ) -> VerifyResult<String> {
        if secret.is_empty() {
            return Err(WebhookSignatureError::InvalidSecret.into());
        }
        if payload.is_empty() {
            return Err(WebhookSignatureError::EmptyPayload.into());
        }
        if timestamp < MINIMUM_TIMESTAMP {
            return Err(WebhookSignatureError::InvalidTimestamp.into());
        }

        let message = format!("{timestamp}.{payload}");
        let digest = self
            .signer
            .sign(secret.as_bytes(), message.as_bytes())
            .await?;

        Ok(BASE64_URL.encode(digest))
    }

    /// Build the canonical `t=<timestamp>,v1=<signature>` header.
    ///
    /// # Errors
    ///
    /// Same as [`compute_signature`](Self::compute_signature).
    pub async fn encode_signature_header(
        &self,
        payload: &str,
        timestamp: u64,
        secret: &str,
    ) -> VerifyResult<String> {
        let signature = self.compute_signature(payload, timestamp, secret).await?;
        Ok(format!("t={timestamp},v1={signature}"))
    }

    /// Verify that `header` is the canonical signature header for `payload`.
    ///
    /// # Errors
    ///
    /// Format errors from decoding or re-encoding, or
    /// [`WebhookSignatureError::SignatureMismatch`] if the recomputed header
    /// differs from `header` in any byte.
    pub async fn verify_signature(
        &self,
        payload: &str,
        header: &str,
        secret: &str,
    ) -> VerifyResult<()> {
        let DecodedSignature { timestamp, .. } = decode_signature_header(header)?;
        let expected = self
            .encode_signature_header(payload, timestamp, secret)
            .await?;

        if header.as_bytes().ct_eq(expected.as_bytes()).into() {
            Ok(())
        } else {
            debug!(timestamp, provided = %header, "webhook signature mismatch");
            Err(WebhookSignatureError::SignatureMismatch.into())
        }
    }

    /// Boolean form of [`verify_signature`](Self::verify_signature).
    ///
    /// Signature errors become `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Any failure that is not a signature error, e.g. a signer backend failure.
    pub async fn is_valid_signature(
        &self,
        payload: &str,
        header: &str,
        secret: &str,
    ) -> VerifyResult<bool> {
        match self.verify_signature(payload, header, secret).await {
            Ok(()) => Ok(true),
            Err(err) if err.is_signature_error() => Ok(false),
            Err(err) => Err(err),
        }
    }
}

/// Compute a signature with the default HMAC-SHA256 signer.
///
/// # Errors
///
/// See [`SignatureCodec::compute_signature`].
pub async fn compute_signature(payload: &str, timestamp: u64, secret: &str) -> VerifyResult<String> {
    let codec: SignatureCodec = SignatureCodec::default();
    codec.compute_signature(payload, timestamp, secret).await
}

/// Encode a signature header with the default HMAC-SHA256 signer.
///
/// # Errors
///
/// See [`SignatureCodec::compute_signature`].
///
/// # Examples
///
/// ```
/// use hooksig_auth::codec::encode_signature_header;
///
/// # tokio_test::block_on(async {
/// let header = encode_signature_header(r#"{"title":"GROQ-Hooks are neat"}"#, 1_633_518_820_676, "try-me")
///     .await
///     .unwrap();
/// assert_eq!(header, "t=1633518820676,v1=e7C9h2sfbFfc4V7TEz7PSOp4IoNzl0UdVsBV-1wgdeA");
/// # });
/// ```
pub async fn encode_signature_header(
    payload: &str,
    timestamp: u64,
    secret: &str,
) -> VerifyResult<String> {
    let codec: SignatureCodec = SignatureCodec::default();
    codec
        .encode_signature_header(payload, timestamp, secret)
        .await
}

/// Verify a signature header with the default HMAC-SHA256 signer.
///
/// # Errors
///
/// See [`SignatureCodec::verify_signature`].
pub async fn verify_signature(payload: &str, header: &str, secret: &str) -> VerifyResult<()> {
    let codec: SignatureCodec = SignatureCodec::default();
    codec.verify_signature(payload, header, secret).await
}

/// Boolean form of [`verify_signature`].
///
/// # Errors
///
/// See [`SignatureCodec::is_valid_signature`].
pub async fn is_valid_signature(payload: &str, header: &str, secret: &str) -> VerifyResult<bool> {
    let codec: SignatureCodec = SignatureCodec::default();
    codec.is_valid_signature(payload, header, secret).await
}
