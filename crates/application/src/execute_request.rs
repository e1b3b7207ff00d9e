//! Execute Request Use Case
//!
//! Turns a scenario's request description into a wire request (resolved
//! URL, merged headers), sends it through the `HttpClient` port and applies
//! the strict/lenient status policy.

use std::sync::Arc;
use std::time::Instant;

use apiprobe_domain::{
    DomainError, Headers, HttpMethod, PreparedRequest, RequestOptions, RequestSpec, ResponseSpec,
};
use serde_json::Value;
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::auth::AuthContext;
use crate::ports::{HttpClient, HttpClientError};
use crate::settings::ProbeSettings;

/// Result type for request execution.
pub type ExecuteResult = Result<ResponseSpec, RequestFailure>;

/// Error type for the execute request use case.
#[derive(Debug, Clone, Error)]
pub enum RequestFailure {
    /// The request could not be built (bad URL, bad query).
    #[error("invalid request: {0}")]
    Invalid(#[from] DomainError),

    /// The exchange failed at the transport level.
    #[error("{0}")]
    Transport(#[from] HttpClientError),

    /// The server answered with a non-2xx status and strict mode was on.
    #[error("{method} {url} failed with status {}", .response.status_code())]
    Status {
        /// Method of the failed request.
        method: HttpMethod,
        /// Resolved URL of the failed request.
        url: String,
        /// The full response, for diagnostics.
        response: Box<ResponseSpec>,
    },
}

impl RequestFailure {
    /// Returns the HTTP status, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { response, .. } => Some(response.status()),
            _ => None,
        }
    }

    /// Returns the response, if one was received.
    #[must_use]
    pub fn response(&self) -> Option<&ResponseSpec> {
        match self {
            Self::Status { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Returns true if the configured timeout ceiling was exceeded.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

/// Use case for executing HTTP requests.
///
/// Header precedence, lowest to highest:
///
/// 1. `Content-Type: application/json` and `Accept: application/json`
/// 2. `Authorization: Bearer <token>` from the per-request override, or
///    else from the [`AuthContext`]
/// 3. `X-API-Key` from [`ProbeSettings`]
/// 4. the caller's own headers
///
/// The executor only ever reads the auth context.
///
/// # Example
///
/// ```ignore
/// let executor = ExecuteRequest::new(Arc::new(client), settings, AuthContext::new());
/// let response = executor
///     .execute(HttpMethod::Get, "/products/1", RequestOptions::new())
///     .await?;
/// ```
pub struct ExecuteRequest<C: HttpClient> {
    client: Arc<C>,
    settings: ProbeSettings,
    auth: AuthContext,
}

impl<C: HttpClient> ExecuteRequest<C> {
    /// Creates a new executor.
    pub const fn new(client: Arc<C>, settings: ProbeSettings, auth: AuthContext) -> Self {
        Self {
            client,
            settings,
            auth,
        }
    }

    /// Returns the auth context this executor reads tokens from.
    pub const fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Returns the settings in effect.
    pub const fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    /// Issues `method url` with `options`.
    ///
    /// # Errors
    ///
    /// See [`ExecuteRequest::execute_spec`].
    pub async fn execute(
        &self,
        method: HttpMethod,
        url: impl Into<String>,
        options: RequestOptions,
    ) -> ExecuteResult {
        self.execute_spec(&RequestSpec::new(method, url).with_options(options))
            .await
    }

    /// Issues a GET with default options.
    ///
    /// # Errors
    ///
    /// See [`ExecuteRequest::execute_spec`].
    pub async fn get(&self, url: impl Into<String>) -> ExecuteResult {
        self.execute(HttpMethod::Get, url, RequestOptions::new()).await
    }

    /// Issues a POST with a JSON body and default options.
    ///
    /// # Errors
    ///
    /// See [`ExecuteRequest::execute_spec`].
    pub async fn post(&self, url: impl Into<String>, body: Value) -> ExecuteResult {
        self.execute(HttpMethod::Post, url, RequestOptions::new().body(body))
            .await
    }

    /// Executes the request and returns the response.
    ///
    /// # Errors
    ///
    /// - `RequestFailure::Invalid` if the URL cannot be resolved
    /// - `RequestFailure::Transport` on network failure or timeout
    /// - `RequestFailure::Status` for non-2xx responses when
    ///   `fail_on_error` is set
    pub async fn execute_spec(&self, request: &RequestSpec) -> ExecuteResult {
        let prepared = self.prepare(request)?;
        let span = tracing::info_span!(
            "http_request",
            request_id = %Uuid::now_v7(),
            method = %prepared.method,
            url = %prepared.url,
        );

        async move {
            tracing::debug!(
                headers = prepared.headers.len(),
                has_body = prepared.body.is_some(),
                "sending request"
            );
            let start = Instant::now();

            let response = match self.client.execute(&prepared).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(error = %e, elapsed = ?start.elapsed(), "request failed");
                    return Err(RequestFailure::Transport(e));
                }
            };

            tracing::info!(
                status = response.status(),
                elapsed = ?start.elapsed(),
                "response received"
            );

            if request.options.fail_on_error && !response.is_success() {
                tracing::warn!(
                    status = %response.status_code(),
                    body = %response.body().preview(),
                    "unexpected status"
                );
                return Err(RequestFailure::Status {
                    method: prepared.method,
                    url: prepared.url.to_string(),
                    response: Box::new(response),
                });
            }
            Ok(response)
        }
        .instrument(span)
        .await
    }

    /// Resolves the URL and merges headers without sending anything.
    ///
    /// # Errors
    ///
    /// Returns `RequestFailure::Invalid` if the URL cannot be resolved.
    pub fn prepare(&self, request: &RequestSpec) -> Result<PreparedRequest, RequestFailure> {
        let url = request.resolve_url(Some(&self.settings.api_base_url))?;
        Ok(PreparedRequest {
            method: request.method,
            url,
            headers: self.merge_headers(&request.options),
            body: request.options.body.clone(),
        })
    }

    fn merge_headers(&self, options: &RequestOptions) -> Headers {
        let mut headers = Headers::new()
            .with("Content-Type", "application/json")
            .with("Accept", "application/json");

        let token = options
            .auth_token
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| self.auth.current_token())
            .filter(|t| !t.is_empty());
        if let Some(token) = token {
            headers.insert("Authorization", format!("Bearer {token}"));
        }

        if let Some(api_key) = self.settings.api_key() {
            headers.insert("X-API-Key", api_key);
        }

        headers.merge(&options.headers);
        headers
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::ports::HttpFuture;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    /// Mock HTTP client that records what it was asked to send.
    struct MockHttpClient {
        response: Result<ResponseSpec, HttpClientError>,
        sent: Mutex<Vec<PreparedRequest>>,
    }

    impl MockHttpClient {
        fn returning(status: u16, body: Value) -> Self {
            Self {
                response: Ok(ResponseSpec::json(status, body)),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: HttpClientError) -> Self {
            Self {
                response: Err(err),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn last(&self) -> PreparedRequest {
            self.sent.lock().last().cloned().expect("no request sent")
        }
    }

    impl HttpClient for MockHttpClient {
        fn execute(&self, request: &PreparedRequest) -> HttpFuture<'_> {
            self.sent.lock().push(request.clone());
            let result = self.response.clone();
            Box::pin(async move { result })
        }
    }

    fn executor(
        client: MockHttpClient,
        settings: ProbeSettings,
    ) -> (Arc<MockHttpClient>, ExecuteRequest<MockHttpClient>) {
        let client = Arc::new(client);
        let exec = ExecuteRequest::new(Arc::clone(&client), settings, AuthContext::new());
        (client, exec)
    }

    #[tokio::test]
    async fn test_default_headers() {
        let (client, exec) =
            executor(MockHttpClient::returning(200, json!({})), ProbeSettings::default());

        exec.get("/products/1").await.unwrap();

        let sent = client.last();
        assert_eq!(sent.url.as_str(), "https://dummyjson.com/products/1");
        assert_eq!(sent.headers.get("content-type"), Some("application/json"));
        assert_eq!(sent.headers.get("accept"), Some("application/json"));
        assert!(!sent.headers.contains("authorization"));
        assert!(!sent.headers.contains("x-api-key"));
        assert_eq!(sent.body, None);
    }

    #[tokio::test]
    async fn test_context_token_attached() {
        let (client, exec) =
            executor(MockHttpClient::returning(200, json!({})), ProbeSettings::default());
        exec.auth().record_token("ctx-token");

        exec.get("/auth/me").await.unwrap();

        assert_eq!(client.last().headers.get("Authorization"), Some("Bearer ctx-token"));
    }

    #[tokio::test]
    async fn test_override_token_beats_context() {
        let (client, exec) =
            executor(MockHttpClient::returning(200, json!({})), ProbeSettings::default());
        exec.auth().record_token("ctx-token");

        exec.execute(HttpMethod::Get, "/auth/me", RequestOptions::new().auth_token("override"))
            .await
            .unwrap();

        assert_eq!(client.last().headers.get("authorization"), Some("Bearer override"));
    }

    #[tokio::test]
    async fn test_empty_override_falls_back_to_context() {
        let (client, exec) =
            executor(MockHttpClient::returning(200, json!({})), ProbeSettings::default());
        exec.auth().record_token("ctx-token");

        exec.execute(HttpMethod::Get, "/auth/me", RequestOptions::new().auth_token(""))
            .await
            .unwrap();

        assert_eq!(client.last().headers.get("authorization"), Some("Bearer ctx-token"));
    }

    #[tokio::test]
    async fn test_explicit_authorization_header_sent_verbatim() {
        let (client, exec) =
            executor(MockHttpClient::returning(200, json!({})), ProbeSettings::default());
        exec.auth().record_token("ctx-token");

        let options = RequestOptions::new()
            .auth_token("override")
            .header("authorization", "Basic dXNlcjpwYXNz");
        exec.execute(HttpMethod::Get, "/auth/me", options).await.unwrap();

        let sent = client.last();
        assert_eq!(sent.headers.get("Authorization"), Some("Basic dXNlcjpwYXNz"));
        assert_eq!(sent.headers.iter().filter(|h| h.is_named("authorization")).count(), 1);
    }

    #[tokio::test]
    async fn test_api_key_from_settings_and_caller_override() {
        let settings = ProbeSettings::default().with_api_key("configured");
        let (client, exec) = executor(MockHttpClient::returning(200, json!({})), settings);

        exec.get("/products").await.unwrap();
        assert_eq!(client.last().headers.get("X-API-Key"), Some("configured"));

        exec.execute(
            HttpMethod::Get,
            "/products",
            RequestOptions::new()
                .header("x-api-key", "caller")
                .header("Content-Type", "text/plain"),
        )
        .await
        .unwrap();
        let sent = client.last();
        assert_eq!(sent.headers.get("X-API-Key"), Some("caller"));
        assert_eq!(sent.headers.get("content-type"), Some("text/plain"));
    }

    #[tokio::test]
    async fn test_null_body_is_forwarded() {
        let (client, exec) =
            executor(MockHttpClient::returning(201, json!({"id": 101})), ProbeSettings::default());

        exec.execute(HttpMethod::Post, "/posts", RequestOptions::new().body(Value::Null))
            .await
            .unwrap();

        assert_eq!(client.last().body, Some(Value::Null));
    }

    #[tokio::test]
    async fn test_strict_mode_rejects_non_2xx() {
        let (_, exec) = executor(
            MockHttpClient::returning(404, json!({"message": "Product with id '99999' not found"})),
            ProbeSettings::default(),
        );

        let err = exec.get("/products/99999").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_timeout());
        assert_eq!(
            err.response().and_then(|r| r.field("message")),
            Some(&json!("Product with id '99999' not found"))
        );
    }

    #[tokio::test]
    async fn test_lenient_mode_returns_non_2xx() {
        let (_, exec) =
            executor(MockHttpClient::returning(404, json!({})), ProbeSettings::default());

        let response = exec
            .execute(HttpMethod::Get, "/products/99999", RequestOptions::new().allow_error_status())
            .await
            .unwrap();
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_transport_errors_propagate() {
        let (_, exec) = executor(
            MockHttpClient::failing(HttpClientError::Timeout { timeout_ms: 10_000 }),
            ProbeSettings::default(),
        );

        let err = exec
            .execute(HttpMethod::Get, "/products", RequestOptions::new().allow_error_status())
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_invalid_url_not_sent() {
        let (client, exec) =
            executor(MockHttpClient::returning(200, json!({})), ProbeSettings::default());

        let err = exec.get("").await.unwrap_err();
        assert!(matches!(err, RequestFailure::Invalid(DomainError::InvalidUrl(_))));
        assert!(client.sent.lock().is_empty());
    }

    #[tokio::test]
    async fn test_query_and_base_path() {
        let settings = ProbeSettings::default().with_base_url("https://reqres.in/api");
        let (client, exec) = executor(MockHttpClient::returning(200, json!({})), settings);

        exec.execute(HttpMethod::Get, "/users", RequestOptions::new().query("page", 2))
            .await
            .unwrap();

        assert_eq!(client.last().url.as_str(), "https://reqres.in/api/users?page=2");
    }
}
