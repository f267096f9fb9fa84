//! HMAC-SHA256 webhook signature verification for Hooksig.
//!
//! This crate implements the signing scheme used for outbound webhooks: every
//! delivery carries a `sanity-webhook-signature` header of the form
//! `t=<timestamp>,v1=<hash>`, where `hash` is the unpadded base64url encoding of
//! `HMAC-SHA256(secret, "<timestamp>.<raw body>")` and `timestamp` is in epoch
//! milliseconds.
//!
//! # Overview
//!
//! The receiving side recomputes the canonical header from the raw body, the
//! timestamp found in the received header and the shared secret, and requires
//! an exact match. Errors are split into format errors (HTTP 400) and value
//! errors (HTTP 401); see [`error`].
//!
//! # Usage
//!
//! ```rust
//! use hooksig_auth::{decode_signature_header, encode_signature_header, verify_signature};
//!
//! # tokio_test::block_on(async {
//! let payload = r#"{"_id":"resume"}"#;
//! let header = encode_signature_header(payload, 1_633_519_811_129, "test").await.unwrap();
//! assert_eq!(decode_signature_header(&header).unwrap().timestamp, 1_633_519_811_129);
//! assert!(verify_signature(payload, &header, "test").await.is_ok());
//! # });
//! ```
//!
//! # Modules
//!
//! - [`codec`] - Header encoding, decoding and signature comparison
//! - [`error`] - Signature error taxonomy
//! - [`request`] - Framework-neutral request abstraction
//! - [`signer`] - Pluggable keyed-digest backends
//! - [`verifier`] - Whole-request verification

pub mod codec;
pub mod error;
pub mod request;
pub mod signer;
pub mod verifier;

pub use codec::{
    DecodedSignature, MINIMUM_TIMESTAMP, SignatureCodec, compute_signature,
    decode_signature_header, encode_signature_header, is_valid_signature, verify_signature,
};
pub use error::{ErrorKind, VerifyError, VerifyResult, WebhookSignatureError};
pub use request::{
    AsRequestBody, ConnectLikeRequest, HeaderField, RequestBody, SIGNATURE_HEADER_NAME,
};
pub use signer::{HmacSha256Signer, Signer};
pub use verifier::{is_valid_request, verify_request};
