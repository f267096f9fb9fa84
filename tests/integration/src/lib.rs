//! Integration tests for the Hooksig signed-request middleware.
//!
//! Each test starts its own receiver on an ephemeral local port and talks to
//! it over real HTTP with `reqwest`, so no external server is required.
//!
//! Run them with:
//! ```text
//! cargo test -p hooksig-integration
//! ```

use std::net::SocketAddr;
use std::sync::Once;

use anyhow::{Context, Result};
use hooksig_http::{EchoHandler, SignedRequestConfig, SignedRequestService};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::debug;

/// Secret shared by the test receiver and the signed fixtures.
pub const SECRET: &str = "test";

/// Body the [`SIGNATURE`] fixture was computed over.
pub const PAYLOAD: &str = r#"{"_id":"resume"}"#;

/// Signature header for [`PAYLOAD`] under [`SECRET`].
pub const SIGNATURE: &str = "t=1633519811129,v1=tLa470fx7qkLLEcMOcEUFuBbRSkGujyskxrNXcoh0N0";

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// A receiver running on a local ephemeral port.
///
/// The accept loop is aborted when the value is dropped.
#[derive(Debug)]
pub struct TestServer {
    addr: SocketAddr,
    task: JoinHandle<()>,
}

impl TestServer {
    /// Start a receiver with the given middleware configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the local listener cannot be bound.
    pub async fn start(config: SignedRequestConfig) -> Result<Self> {
        init_tracing();

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind test listener")?;
        let addr = listener.local_addr().context("listener has no address")?;
        let service = SignedRequestService::new(EchoHandler, config);

        let task = tokio::spawn(async move {
            let http = HttpConnBuilder::new(TokioExecutor::new());
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    continue;
                };
                let conn = http
                    .serve_connection(TokioIo::new(stream), service.clone())
                    .into_owned();
                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        debug!(error = %e, "test connection error");
                    }
                });
            }
        });

        Ok(Self { addr, task })
    }

    /// Start a receiver with default options for [`SECRET`].
    ///
    /// # Errors
    ///
    /// Returns an error if the local listener cannot be bound.
    pub async fn start_default() -> Result<Self> {
        Self::start(SignedRequestConfig::new(SECRET)).await
    }

    /// URL of the webhook endpoint.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}/hook", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// POST `body` to the server, optionally with a signature header.
///
/// Returns the status code and the decoded JSON body.
///
/// # Errors
///
/// Returns an error if the request fails or the response is not JSON.
pub async fn post_webhook(
    server: &TestServer,
    signature: Option<&str>,
    body: &str,
) -> Result<(u16, Value)> {
    let mut request = reqwest::Client::new()
        .post(server.url())
        .header("content-type", "application/json")
        .body(body.to_owned());
    if let Some(signature) = signature {
        request = request.header(hooksig_auth::SIGNATURE_HEADER_NAME, signature);
    }

    let response = request.send().await.context("webhook request failed")?;
    let status = response.status().as_u16();
    let body = response
        .json::<Value>()
        .await
        .context("webhook response is not JSON")?;
    Ok((status, body))
}

mod test_middleware;
mod test_options;
