//! Login Use Case
//!
//! Posts credentials to a login endpoint and records the returned bearer
//! token in the executor's auth context.

use apiprobe_domain::testing::assert_status;
use apiprobe_domain::{AssertionFailure, HttpMethod, RequestOptions, ResponseSpec};
use serde_json::Value;
use thiserror::Error;

use crate::execute_request::{ExecuteRequest, RequestFailure};
use crate::ports::HttpClient;

/// Error type for the login use case.
#[derive(Debug, Clone, Error)]
pub enum LoginError {
    /// The login request could not be completed.
    #[error(transparent)]
    Request(#[from] RequestFailure),

    /// The login endpoint did not answer 200.
    #[error("login rejected: {0}")]
    Rejected(#[from] AssertionFailure),
}

/// Logs in and stores the token.
///
/// The token is read from `token`, then `data.token`, then `accessToken`.
/// A 200 response with none of these is returned as-is, leaving the auth
/// context untouched.
///
/// # Errors
///
/// - `LoginError::Request` when the request cannot be sent
/// - `LoginError::Rejected` when the status is not 200
pub async fn login<C: HttpClient>(
    executor: &ExecuteRequest<C>,
    path: &str,
    credentials: Value,
) -> Result<ResponseSpec, LoginError> {
    let options = RequestOptions::new().body(credentials).allow_error_status();
    let response = executor.execute(HttpMethod::Post, path, options).await?;
    assert_status(&response, 200)?;

    match extract_token(&response) {
        Some(token) => executor.auth().record_token(token),
        None => tracing::warn!(path, "login succeeded without a token in the response"),
    }
    Ok(response)
}

/// Finds the bearer token in a login response body.
#[must_use]
pub fn extract_token(response: &ResponseSpec) -> Option<&str> {
    let body = response.json_body()?;
    ["/token", "/data/token", "/accessToken"]
        .iter()
        .find_map(|pointer| body.pointer(pointer).and_then(Value::as_str))
}
