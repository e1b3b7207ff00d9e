//! Per-request options

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Headers, QueryParams, QueryValue};

const fn default_fail_on_error() -> bool {
    true
}

/// Options accompanying a single request.
///
/// | Field           | Default | Meaning                                         |
/// |-----------------|---------|-------------------------------------------------|
/// | `body`          | `None`  | JSON payload; `None` omits the body entirely    |
/// | `headers`       | empty   | Caller headers, applied last (highest priority) |
/// | `query`         | `None`  | Scalar query parameters appended to the URL     |
/// | `fail_on_error` | `true`  | Non-2xx responses become errors                 |
/// | `auth_token`    | `None`  | Bearer token overriding the shared auth context |
///
/// `Some(Value::Null)` is distinct from `None`: it sends a literal `null`
/// body, which some scenarios rely on to probe null handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Request payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Caller-supplied headers.
    #[serde(default)]
    pub headers: Headers,
    /// Query parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<QueryParams>,
    /// Whether non-2xx responses are turned into errors.
    #[serde(default = "default_fail_on_error")]
    pub fail_on_error: bool,
    /// Explicit bearer token for this request only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            body: None,
            headers: Headers::new(),
            query: None,
            fail_on_error: true,
            auth_token: None,
        }
    }
}

impl RequestOptions {
    /// Creates options with every field at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a caller header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.get_or_insert_with(QueryParams::new).add(key, value);
        self
    }

    /// Accepts non-2xx responses instead of failing on them.
    #[must_use]
    pub const fn allow_error_status(mut self) -> Self {
        self.fail_on_error = false;
        self
    }

    /// Sets whether non-2xx responses are turned into errors.
    #[must_use]
    pub const fn fail_on_error(mut self, fail: bool) -> Self {
        self.fail_on_error = fail;
        self
    }

    /// Uses `token` as the bearer token for this request.
    #[must_use]
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }
}
