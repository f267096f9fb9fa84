//! Middleware configuration.

use typed_builder::TypedBuilder;

/// Configuration for [`SignedRequestService`](crate::service::SignedRequestService).
///
/// # Examples
///
/// ```
/// use hooksig_http::config::SignedRequestConfig;
///
/// let config = SignedRequestConfig::builder()
///     .secret("test")
///     .respond_on_error(false)
///     .build();
/// assert!(config.parse_body);
/// assert!(!config.respond_on_error);
/// ```
#[derive(Clone, TypedBuilder)]
pub struct SignedRequestConfig {
    /// Shared secret the sender signs payloads with.
    #[builder(setter(into))]
    pub secret: String,

    /// Parse verified bodies as JSON before handing them to the handler.
    #[builder(default = true)]
    pub parse_body: bool,

    /// Answer signature errors directly with `{"message": ...}` instead of
    /// routing them to the handler's error path.
    #[builder(default = true)]
    pub respond_on_error: bool,
}

impl SignedRequestConfig {
    /// Create a configuration with default options for the given secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self::builder().secret(secret).build()
    }
}

impl std::fmt::Debug for SignedRequestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedRequestConfig")
            .field("secret", &"...")
            .field("parse_body", &self.parse_body)
            .field("respond_on_error", &self.respond_on_error)
            .finish()
    }
}
