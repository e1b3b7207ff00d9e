//! Harness settings.

use std::time::Duration;

use apiprobe_domain::DemoApi;
use serde::Deserialize;

/// Default request ceiling in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

fn default_base_url() -> String {
    DemoApi::default().base_url().to_string()
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Process-wide settings for a test run.
///
/// Field names match the environment variables they are read from
/// (`API_BASE_URL`, `API_KEY`, `AUTH_TOKEN`, `API_TIMEOUT_MS`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProbeSettings {
    /// Root that relative request URLs are resolved against.
    #[serde(default = "default_base_url")]
    pub api_base_url: String,
    /// Value for the `X-API-Key` header, if any.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Token seeding the auth context.
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Ceiling applied to connecting, sending and receiving.
    #[serde(default = "default_timeout_ms")]
    pub api_timeout_ms: u64,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            api_key: None,
            auth_token: None,
            api_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ProbeSettings {
    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into();
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the seed token.
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Sets the timeout ceiling.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.api_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Returns the API key, treating an empty value as unset.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Returns the seed token, treating an empty value as unset.
    #[must_use]
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Returns the timeout ceiling.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.api_timeout_ms)
    }
}
