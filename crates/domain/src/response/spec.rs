//! Response specification type
//!
//! Contains the normalized view of an HTTP response that assertions
//! operate on: status, headers, decoded body and timing.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns true if this is a 2xx success status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Returns true if this is a 4xx client error status.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    /// Returns true if this is a 5xx server error status.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.0 >= 500 && self.0 < 600
    }

    /// Returns the canonical reason phrase for common status codes.
    #[must_use]
    pub const fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            408 => "Request Timeout",
            409 => "Conflict",
            413 => "Payload Too Large",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// Decoded response payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Zero-length payload.
    Empty,
    /// Payload that parsed as JSON.
    Json(Value),
    /// Anything else, decoded lossily as UTF-8.
    Text(String),
}

impl ResponseBody {
    /// Decodes raw bytes, preferring JSON when the bytes parse as JSON.
    #[must_use]
    pub fn decode(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::Empty;
        }
        serde_json::from_slice(bytes).map_or_else(
            |_| Self::Text(String::from_utf8_lossy(bytes).into_owned()),
            Self::Json,
        )
    }

    /// Returns the JSON value, if the body is JSON.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns a short preview for diagnostics.
    #[must_use]
    pub fn preview(&self) -> String {
        let full = match self {
            Self::Empty => return "<empty>".to_string(),
            Self::Json(value) => value.to_string(),
            Self::Text(text) => text.clone(),
        };
        if full.chars().count() > 100 {
            let truncated: String = full.chars().take(100).collect();
            format!("{truncated}...")
        } else {
            full
        }
    }
}

/// Normalized HTTP response.
///
/// Built once by the HTTP client and never mutated afterwards; all
/// fields are read through accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSpec {
    status: u16,
    headers: HashMap<String, String>,
    body: ResponseBody,
    duration: Duration,
}

impl ResponseSpec {
    /// Creates a new `ResponseSpec` from raw response data.
    ///
    /// Header names are lower-cased so lookups are case-insensitive.
    #[must_use]
    pub fn new(
        status: impl Into<StatusCode>,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        Self {
            status: status.into().as_u16(),
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v))
                .collect(),
            body: ResponseBody::decode(&body),
            duration,
        }
    }

    /// Creates a JSON response with an `application/json` content type.
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            headers: HashMap::from([(
                "content-type".to_string(),
                "application/json; charset=utf-8".to_string(),
            )]),
            body: ResponseBody::Json(body),
            duration: Duration::ZERO,
        }
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the status as a `StatusCode` struct.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::new(self.status)
    }

    /// Returns all headers, keyed by lower-cased name.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns the `Content-Type` header, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Returns the decoded body.
    #[must_use]
    pub const fn body(&self) -> &ResponseBody {
        &self.body
    }

    /// Returns the body as JSON, if it is JSON.
    #[must_use]
    pub const fn json_body(&self) -> Option<&Value> {
        self.body.as_json()
    }

    /// Returns a top-level field of a JSON object body.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.json_body()
            .and_then(Value::as_object)
            .and_then(|obj| obj.get(name))
    }

    /// Returns the time taken to receive the response.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code().is_success()
    }

    /// Returns true if the status code indicates a client error (4xx).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Returns true if the status code indicates a server error (5xx).
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}
