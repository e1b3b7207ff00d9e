//! Request specification type

use serde::{Deserialize, Serialize};
use url::Url;

use super::{HttpMethod, RequestOptions};
use crate::error::{DomainError, DomainResult};

/// A request as described by a scenario: verb, target and options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute URL, or a path relative to the configured base URL
    pub url: String,
    /// Body, headers, query and failure handling
    #[serde(default)]
    pub options: RequestOptions,
}

impl RequestSpec {
    /// Creates a request specification with default options.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            options: RequestOptions::default(),
        }
    }

    /// Creates a GET request with the given URL.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Replaces the options.
    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns true if the URL already names a scheme and host.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        let url = self.url.trim_start();
        ["http://", "https://"].iter().any(|scheme| {
            url.get(..scheme.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
        })
    }

    /// Resolves the URL against `base_url` and appends the query parameters.
    ///
    /// Absolute URLs are used as-is. Relative ones are appended to the base,
    /// keeping any path the base already carries (`https://reqres.in/api`
    /// + `/login` gives `https://reqres.in/api/login`).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` when the URL is empty, relative
    /// without a base, or malformed, and `DomainError::InvalidQuery` when
    /// the query cannot be encoded.
    pub fn resolve_url(&self, base_url: Option<&str>) -> DomainResult<Url> {
        let raw = self.url.trim();
        if raw.is_empty() {
            return Err(DomainError::InvalidUrl("URL is required".to_string()));
        }

        let joined = if self.is_absolute() {
            raw.to_string()
        } else {
            let base = base_url
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .ok_or_else(|| {
                    DomainError::InvalidUrl(format!("relative URL '{raw}' without a base URL"))
                })?;
            format!(
                "{}/{}",
                base.trim_end_matches('/'),
                raw.trim_start_matches('/')
            )
        };

        let mut url =
            Url::parse(&joined).map_err(|e| DomainError::InvalidUrl(format!("{e}: {joined}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "unsupported scheme '{}': {joined}",
                url.scheme()
            )));
        }

        if let Some(query) = self.options.query.as_ref().filter(|q| !q.is_empty()) {
            let encoded = query.encode()?;
            let combined = match url.query() {
                Some(existing) if !existing.is_empty() => format!("{existing}&{encoded}"),
                _ => encoded,
            };
            url.set_query(Some(&combined));
        }

        Ok(url)
    }
}
