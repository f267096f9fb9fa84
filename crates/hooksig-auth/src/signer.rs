//! Keyed-digest backends used by the signature codec.
//!
//! The codec never touches a MAC implementation directly; it asks a [`Signer`]
//! to produce the raw digest bytes. [`HmacSha256Signer`] is the in-process
//! implementation. Backends that must call out to an asynchronous crypto
//! facility implement the same trait.
//!
//! # Object safety
//!
//! [`Signer`] uses `#[async_trait]` so it stays object-safe and can be held as
//! `Box<dyn Signer>` or `Arc<dyn Signer>`.

use hmac::{Hmac, KeyInit, Mac};
use sha2::Sha256;

use crate::error::{VerifyError, VerifyResult};

type HmacSha256 = Hmac<Sha256>;

/// Capability to compute a keyed digest over a message.
#[async_trait::async_trait]
pub trait Signer: Send + Sync {
    /// Sign `message` with the raw `key` bytes and return the digest bytes.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::Signer`] if the backend cannot produce a digest.
    async fn sign(&self, key: &[u8], message: &[u8]) -> VerifyResult<Vec<u8>>;
}

/// HMAC-SHA256 computed in-process.
///
/// # Examples
///
/// ```
/// use hooksig_auth::signer::{HmacSha256Signer, Signer};
///
/// # tokio_test::block_on(async {
/// let digest = HmacSha256Signer.sign(b"key", b"message").await.unwrap();
/// assert_eq!(digest.len(), 32);
/// # });
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256Signer;

#[async_trait::async_trait]
impl Signer for HmacSha256Signer {
    async fn sign(&self, key: &[u8], message: &[u8]) -> VerifyResult<Vec<u8>> {
        hmac_sha256(key, message)
    }
}

/// Compute HMAC-SHA256 and return the raw bytes.
fn hmac_sha256(key: &[u8], data: &[u8]) -> VerifyResult<Vec<u8>> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| VerifyError::Signer(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
