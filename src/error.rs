//! Typed error hierarchy for the automox crate.
//!
//! `AutomoxError` is a structured enum whose variants map to the real
//! failure boundaries of the system:
//! - `MissingToken` covers client construction with no credential.
//! - `Api` covers non-2xx responses from the Automox console, carrying the
//!   decoded `errors` message list so diagnostics are never discarded.
//! - `Network` wraps `reqwest::Error` for transport-level failures (DNS,
//!   TCP, TLS, timeout) that never produced an HTTP status code.
//! - `Decode` wraps `serde_json::Error` for response bodies that fail to
//!   deserialize, including the service's non-standard scalar encodings.
//! - `Cancelled` reports that a caller-supplied cancellation token fired
//!   while a request was in flight.
//!
//! Every operation in the crate returns [`Result`]; nothing is retried or
//! swallowed internally.

use reqwest::StatusCode;
use serde::Deserialize;

/// Unified error type for all automox library operations.
///
/// The `#[source]`/`#[from]` attributes on wrapped errors enable
/// `Error::source()` chaining so callers and logging frameworks can
/// traverse the full cause chain.
#[derive(Debug, thiserror::Error)]
pub enum AutomoxError {
    /// Client construction was attempted without a bearer token.
    ///
    /// The Automox console rejects every unauthenticated request, so an
    /// empty credential is caught at construction time rather than on the
    /// first API call.
    #[error("a valid Automox API token is required to create a client")]
    MissingToken,

    /// The Automox API returned a non-success HTTP status code.
    ///
    /// The console reports failures as `{"errors": ["<message>", ...]}`.
    /// That message list is preserved here regardless of which entity type
    /// the caller originally requested. If the body did not match the
    /// error-payload shape, `errors` holds the raw body as its single
    /// element so nothing is lost.
    #[error("API error {status}: {}", .errors.join("; "))]
    Api {
        /// The HTTP status code returned by the API.
        status: StatusCode,
        /// The human-readable error messages from the response body.
        errors: Vec<String>,
    },

    /// A network-level failure occurred (DNS resolution, TCP connection,
    /// TLS handshake, request timeout, or a body read that failed
    /// mid-stream). Wraps the underlying `reqwest::Error`, which carries
    /// detailed transport diagnostics.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON deserialization failed when parsing a response body.
    ///
    /// This covers malformed JSON as well as the custom scalar decoders:
    /// a quoted integer that is not a number, or a timestamp that does not
    /// match the console's `+0000`-offset layout.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The caller-supplied cancellation token was triggered while the
    /// request was in flight. The request future is dropped, aborting the
    /// underlying connection.
    #[error("request cancelled")]
    Cancelled,
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, AutomoxError>;

/// Wire shape of the Automox error payload.
///
/// The console returns this body on every non-2xx response:
/// `{"errors": ["<message>", ...]}`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error messages.
    #[serde(default)]
    pub errors: Vec<String>,
}
