//! HTTP Client port

use std::future::Future;
use std::pin::Pin;

use apiprobe_domain::{PreparedRequest, ResponseSpec};
use thiserror::Error;

/// Boxed future returned by [`HttpClient::execute`].
pub type HttpFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + 'a>>;

/// Port for sending a fully prepared request over the wire.
///
/// Implementations hold no per-request state, so a single client may be
/// shared by scenarios running concurrently.
pub trait HttpClient: Send + Sync {
    /// Sends the request and returns the normalized response.
    ///
    /// Any status code, including 4xx and 5xx, is a successful exchange at
    /// this level; only transport problems are errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// timeout, or an unencodable body.
    fn execute(&self, request: &PreparedRequest) -> HttpFuture<'_>;
}

/// Transport-level failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// The URL was rejected by the client.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// A header name or value was rejected.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// The configured ceiling was exceeded while connecting, sending or receiving.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The ceiling that was exceeded.
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("DNS resolution failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying message.
        message: String,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The redirect limit was hit.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// Any other failure.
    #[error("{0}")]
    Other(String),
}

impl HttpClientError {
    /// Returns true if this error is a timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
