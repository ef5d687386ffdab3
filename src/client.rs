//! Authenticated HTTP client for the Automox console API.
//!
//! `AutomoxClient` wraps a `reqwest::Client`, the bearer credential, and
//! the base URL, providing the JSON request helper the resource modules
//! (`servers`, `packages`, `queues`) build on.
//!
//! Transport behavior:
//! - Every request carries the fixed header set ([`FIXED_HEADERS`]) plus
//!   `Authorization: Bearer <token>`.
//! - Connections are not reused across requests; the pool keeps no idle
//!   connections, matching the console's close-after-response behavior.
//! - Status dispatch is explicit: a non-2xx response is decoded into the
//!   `{"errors": [...]}` payload and surfaced as `AutomoxError::Api`
//!   regardless of which entity type the caller asked for; a 2xx response
//!   decodes into the caller's target type.
//! - A caller-supplied `CancellationToken` aborts in-flight requests at
//!   any phase, including the body read after headers have arrived.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::error::{AutomoxError, ErrorResponse, Result};

/// Production base URL for the Automox console API.
const BASE_URL: &str = "https://console.automox.com/";

/// Default overall request timeout.
///
/// Covers the full round-trip including the response body. Five minutes is
/// generous for the largest observed responses (full server inventories);
/// callers wanting a tighter bound set their own via
/// [`AutomoxClientBuilder::timeout`] or enforce one externally through a
/// cancellation token.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Fixed headers applied to every outgoing request.
///
/// The console expects cache-disabling and HSTS headers alongside the JSON
/// accept header; they never vary per endpoint, so they live in one
/// constant rather than at each call site.
pub const FIXED_HEADERS: &[(&str, &str)] = &[
    ("Accept", "application/json"),
    (
        "Cache-Control",
        "no-store, no-cache, must-revalidate, max-age=0, post-check=0, pre-check=0",
    ),
    (
        "Strict-Transport-Security",
        "max-age=31536000 ; includeSubDomains",
    ),
];

/// Builds a `reqwest::Client` with the crate's transport defaults.
///
/// Idle pooling is disabled so each request uses a fresh connection,
/// matching the console's close-after-response semantics.
fn build_http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(0)
        .build()
        .expect("failed to build HTTP client for the Automox API")
}

/// Authenticated client for the Automox console REST API.
///
/// Immutable after construction: all request methods take `&self` and the
/// client holds no interior mutability, so one instance can serve
/// concurrent call sites without locks. Each call is a single stateless
/// request/response round trip.
pub struct AutomoxClient {
    client: Client,
    base_url: String,
    token: String,
    cancel: Option<CancellationToken>,
}

/// Builder for [`AutomoxClient`].
///
/// Construction fails with [`AutomoxError::MissingToken`] when the token
/// is empty; every other field has a documented default.
pub struct AutomoxClientBuilder {
    token: String,
    base_url: String,
    timeout: Duration,
    http_client: Option<Client>,
    cancel: Option<CancellationToken>,
}

impl AutomoxClientBuilder {
    fn new(token: &str) -> Self {
        AutomoxClientBuilder {
            token: token.to_string(),
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            http_client: None,
            cancel: None,
        }
    }

    /// Overrides the base URL, e.g. to point at a local mock server.
    ///
    /// This replaces any environment-driven scheme switching: tests pass
    /// the mock server's `http://` URL here explicitly. A trailing slash
    /// is appended when missing so path joining stays uniform.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        self
    }

    /// Sets the overall per-request timeout. Default: 5 minutes.
    ///
    /// Ignored when a custom HTTP client is supplied via
    /// [`http_client`](Self::http_client) — the caller's own timeout
    /// configuration wins in that case.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Supplies a pre-configured `reqwest::Client` instead of the default
    /// transport. Useful for custom TLS, proxies, or pooling policies.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Attaches a cancellation token honored by every request this client
    /// makes. Triggering the token aborts in-flight requests with
    /// [`AutomoxError::Cancelled`].
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// [`AutomoxError::MissingToken`] when the token is empty.
    pub fn build(self) -> Result<AutomoxClient> {
        if self.token.is_empty() {
            return Err(AutomoxError::MissingToken);
        }

        let client = self
            .http_client
            .unwrap_or_else(|| build_http_client(self.timeout));

        Ok(AutomoxClient {
            client,
            base_url: self.base_url,
            token: self.token,
            cancel: self.cancel,
        })
    }
}

impl AutomoxClient {
    /// Creates a client with default transport settings.
    ///
    /// # Errors
    ///
    /// [`AutomoxError::MissingToken`] when the token is empty.
    pub fn new(token: &str) -> Result<Self> {
        AutomoxClient::builder(token).build()
    }

    /// Returns a builder for customizing the base URL, timeout, transport,
    /// or cancellation token.
    pub fn builder(token: &str) -> AutomoxClientBuilder {
        AutomoxClientBuilder::new(token)
    }

    /// Executes an authenticated GET and returns the raw response once the
    /// status has been checked.
    ///
    /// Used directly when only the status matters; [`get_json`](Self::get_json)
    /// layers typed decoding on top. `path` is relative to the base URL
    /// (no leading slash).
    ///
    /// On a non-2xx status the body is fully read and decoded into the
    /// console's error payload; the caller's intended target type never
    /// sees a failure body. A body that does not match the payload shape
    /// is preserved verbatim as the single error message.
    pub async fn send(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);

        let mut req = self.client.get(&url).bearer_auth(&self.token);
        for (name, value) in FIXED_HEADERS {
            req = req.header(*name, *value);
        }

        tracing::debug!(%url, "sending GET request");

        let response = self.with_cancel(req.send()).await?;

        tracing::debug!(status = %response.status(), headers = ?response.headers(), "received response");

        let status = response.status();
        if !status.is_success() {
            let body = match self.with_cancel(response.text()).await {
                Ok(body) => body,
                Err(AutomoxError::Cancelled) => return Err(AutomoxError::Cancelled),
                Err(_) => String::new(),
            };
            return Err(api_error(status, body));
        }

        Ok(response)
    }

    /// Executes an authenticated GET and decodes the 2xx body into `T`.
    ///
    /// The body is read in full before decoding so decode failures still
    /// leave the connection drained.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(path).await?;
        let body = self.with_cancel(response.text()).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Races a transport future against the cancellation token. Every
    /// awaited phase of a request goes through here, so a cancel fired
    /// mid-body still aborts rather than waiting out the read.
    async fn with_cancel<T>(
        &self,
        fut: impl Future<Output = std::result::Result<T, reqwest::Error>>,
    ) -> Result<T> {
        match &self.cancel {
            Some(token) => tokio::select! {
                _ = token.cancelled() => Err(AutomoxError::Cancelled),
                out = fut => Ok(out?),
            },
            None => Ok(fut.await?),
        }
    }
}

/// Converts a non-2xx status and its already-read body into
/// `AutomoxError::Api`. The raw body survives as the single error
/// message when it does not match the error-payload shape.
fn api_error(status: StatusCode, body: String) -> AutomoxError {
    let errors = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(payload) if !payload.errors.is_empty() => payload.errors,
        _ if body.is_empty() => Vec::new(),
        _ => vec![body],
    };
    AutomoxError::Api { status, errors }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_rejected_at_construction() {
        let result = AutomoxClient::new("");
        assert!(
            matches!(result, Err(AutomoxError::MissingToken)),
            "empty token must fail with MissingToken"
        );
    }

    #[test]
    fn valid_token_constructs_a_client() {
        let client = AutomoxClient::new("api-token").unwrap();
        assert_eq!(client.base_url, BASE_URL);
    }

    #[test]
    fn builder_rejects_empty_token_regardless_of_overrides() {
        let result = AutomoxClient::builder("")
            .base_url("http://127.0.0.1:9999")
            .timeout(Duration::from_secs(1))
            .build();
        assert!(matches!(result, Err(AutomoxError::MissingToken)));
    }

    #[test]
    fn base_url_override_gains_trailing_slash() {
        let client = AutomoxClient::builder("tok")
            .base_url("http://127.0.0.1:8080")
            .build()
            .unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:8080/");
    }

    #[test]
    fn base_url_override_keeps_existing_trailing_slash() {
        let client = AutomoxClient::builder("tok")
            .base_url("http://127.0.0.1:8080/")
            .build()
            .unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:8080/");
    }

    #[test]
    fn fixed_headers_cover_accept_cache_and_hsts() {
        let names: Vec<&str> = FIXED_HEADERS.iter().map(|(n, _)| *n).collect();
        assert!(names.contains(&"Accept"));
        assert!(names.contains(&"Cache-Control"));
        assert!(names.contains(&"Strict-Transport-Security"));
    }

    #[test]
    fn client_is_send_and_sync() {
        // One client instance may be shared across concurrent call sites.
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AutomoxClient>();
    }

    #[tokio::test]
    async fn cancellation_wins_over_a_stalled_transport_phase() {
        // A body read that never completes must still yield to the token;
        // the pending future stands in for a connection that went quiet
        // after headers arrived.
        let token = CancellationToken::new();
        let client = AutomoxClient::builder("tok")
            .cancellation(token.clone())
            .build()
            .unwrap();

        token.cancel();

        let stalled = std::future::pending::<std::result::Result<String, reqwest::Error>>();
        let result = client.with_cancel(stalled).await;
        assert!(matches!(result, Err(AutomoxError::Cancelled)));
    }

    #[tokio::test]
    async fn without_a_token_the_transport_future_runs_to_completion() {
        let client = AutomoxClient::new("tok").unwrap();
        let done = std::future::ready(Ok::<_, reqwest::Error>(7));
        assert_eq!(client.with_cancel(done).await.unwrap(), 7);
    }
}
