//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It handles all HTTP communication for the harness.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use apiprobe_application::ports::{HttpClient, HttpClientError, HttpFuture};
use apiprobe_application::settings::ProbeSettings;
use apiprobe_domain::{Headers, HttpMethod, PreparedRequest, ResponseSpec};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};

const USER_AGENT: &str = concat!("apiprobe/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
///
/// One timeout ceiling applies to each phase on its own: connecting,
/// sending the request until the response head arrives, and reading the
/// body. Exceeding it in any phase yields `HttpClientError::Timeout`.
pub struct ReqwestHttpClient {
    client: Client,
    timeout: Duration,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with the given timeout ceiling.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "apiprobe/<version>"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(timeout: Duration) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// Creates a client using the timeout from `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn from_settings(settings: &ProbeSettings) -> Result<Self, HttpClientError> {
        Self::new(settings.timeout())
    }

    /// Creates a new HTTP client with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Validates and converts the merged header set.
    fn build_headers(headers: &Headers) -> Result<HeaderMap, HttpClientError> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for header in headers.iter() {
            let name = HeaderName::from_bytes(header.name.as_bytes())
                .map_err(|e| HttpClientError::InvalidHeader(format!("{}: {e}", header.name)))?;
            let value = HeaderValue::from_str(&header.value)
                .map_err(|e| HttpClientError::InvalidHeader(format!("{}: {e}", header.name)))?;
            map.insert(name, value);
        }
        Ok(map)
    }

    /// Flattens response headers, joining repeated values with `, `.
    fn collect_headers(headers: &HeaderMap) -> HashMap<String, String> {
        let mut collected: HashMap<String, String> = HashMap::with_capacity(headers.keys_len());
        for (name, value) in headers {
            let value = value.to_str().unwrap_or("<binary>");
            collected
                .entry(name.to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(value);
                })
                .or_insert_with(|| value.to_string());
        }
        collected
    }

    /// Maps reqwest errors to domain `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let host = || {
            error
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = error.to_string();
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(reqwest::Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        HttpClientError::Other(error.to_string())
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(&self, request: &PreparedRequest) -> HttpFuture<'_> {
        let method = Self::to_reqwest_method(request.method);
        let url = request.url.clone();
        let headers = Self::build_headers(&request.headers);
        let body = request
            .body_bytes()
            .map_err(|e| HttpClientError::InvalidBody(e.to_string()));
        let timeout_ms = self.timeout_ms();

        Box::pin(async move {
            let mut builder = self.client.request(method, url).headers(headers?);
            if let Some(bytes) = body? {
                builder = builder.body(bytes);
            }

            // connect, send and receive each get the full ceiling
            let start = Instant::now();
            let response = tokio::time::timeout(self.timeout, builder.send())
                .await
                .map_err(|_| HttpClientError::Timeout { timeout_ms })?
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            let status = response.status().as_u16();
            let response_headers = Self::collect_headers(response.headers());

            let body_bytes = tokio::time::timeout(self.timeout, response.bytes())
                .await
                .map_err(|_| HttpClientError::Timeout { timeout_ms })?
                .map_err(|e| {
                    if e.is_timeout() {
                        HttpClientError::Timeout { timeout_ms }
                    } else {
                        HttpClientError::Other(format!("Failed to read body: {e}"))
                    }
                })?
                .to_vec();

            Ok(ResponseSpec::new(
                status,
                response_headers,
                body_bytes,
                start.elapsed(),
            ))
        })
    }
}
