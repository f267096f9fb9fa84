//! Server configuration loaded from the environment.

use anyhow::{Context, Result};
use hooksig_http::SignedRequestConfig;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Configuration for the webhook receiver.
///
/// Defaults match a local development setup; every field can be overridden
/// through environment variables via [`ServerConfig::from_env`].
#[derive(Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Bind address for the receiver (e.g. `"0.0.0.0:3000"`).
    #[builder(default = String::from("0.0.0.0:3000"))]
    pub gateway_listen: String,

    /// Shared secret webhooks are signed with. Required to serve.
    #[builder(default, setter(strip_option, into))]
    #[serde(skip_serializing)]
    pub webhook_secret: Option<String>,

    /// Parse verified bodies as JSON.
    #[builder(default = true)]
    pub parse_body: bool,

    /// Answer signature errors directly instead of via the handler.
    #[builder(default = true)]
    pub respond_on_error: bool,

    /// Log level filter.
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("gateway_listen", &self.gateway_listen)
            .field("webhook_secret", &self.webhook_secret.as_ref().map(|_| "..."))
            .field("parse_body", &self.parse_body)
            .field("respond_on_error", &self.respond_on_error)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("GATEWAY_LISTEN") {
            config.gateway_listen = v;
        }
        if let Ok(v) = std::env::var("WEBHOOK_SECRET") {
            config.webhook_secret = Some(v);
        }
        if let Ok(v) = std::env::var("WEBHOOK_PARSE_BODY") {
            config.parse_body = parse_bool(&v);
        }
        if let Ok(v) = std::env::var("WEBHOOK_RESPOND_ON_ERROR") {
            config.respond_on_error = parse_bool(&v);
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }

    /// Build the middleware configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no webhook secret is configured.
    pub fn signed_request_config(&self) -> Result<SignedRequestConfig> {
        let secret = self
            .webhook_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .context("WEBHOOK_SECRET must be set to a non-empty value")?;

        Ok(SignedRequestConfig::builder()
            .secret(secret)
            .parse_body(self.parse_body)
            .respond_on_error(self.respond_on_error)
            .build())
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
