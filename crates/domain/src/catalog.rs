//! Catalog of the public demo APIs scenarios run against.

use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// Public demo REST APIs known to the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DemoApi {
    /// JSONPlaceholder: posts, comments, albums, photos, todos, users.
    JsonPlaceholder,
    /// ReqRes: users plus login/register endpoints.
    Reqres,
    /// DummyJSON: products, carts, users and auth.
    #[default]
    DummyJson,
}

impl DemoApi {
    /// Returns every API in the catalog.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::JsonPlaceholder, Self::Reqres, Self::DummyJson]
    }

    /// Returns the catalog key, e.g. `DUMMY_JSON`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::JsonPlaceholder => "JSON_PLACEHOLDER",
            Self::Reqres => "REQRES",
            Self::DummyJson => "DUMMY_JSON",
        }
    }

    /// Returns the API's base URL (no trailing slash).
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::JsonPlaceholder => "https://jsonplaceholder.typicode.com",
            Self::Reqres => "https://reqres.in/api",
            Self::DummyJson => "https://dummyjson.com",
        }
    }

    /// Returns a one-line description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::JsonPlaceholder => {
                "Simple REST API for testing. Supports GET, POST, PUT, DELETE."
            }
            Self::Reqres => "REST API with authentication endpoints. Good for auth testing.",
            Self::DummyJson => "REST API with products, authentication, and e-commerce endpoints.",
        }
    }

    /// Returns the named endpoints as `(name, path template)` pairs.
    #[must_use]
    pub const fn endpoints(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::JsonPlaceholder => &[
                ("posts", "/posts"),
                ("comments", "/comments"),
                ("albums", "/albums"),
                ("photos", "/photos"),
                ("todos", "/todos"),
                ("users", "/users"),
            ],
            Self::Reqres => &[
                ("users", "/users"),
                ("login", "/login"),
                ("register", "/register"),
                ("singleUser", "/users/{id}"),
            ],
            Self::DummyJson => &[
                ("products", "/products"),
                ("singleProduct", "/products/{id}"),
                ("authLogin", "/auth/login"),
                ("authRefresh", "/auth/refresh"),
                ("users", "/users"),
                ("carts", "/carts"),
                ("orders", "/orders"),
            ],
        }
    }

    /// Looks up a named endpoint's path template.
    #[must_use]
    pub fn endpoint(self, name: &str) -> Option<&'static str> {
        self.endpoints()
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, path)| *path)
    }

    /// Builds a full URL for `endpoint`, substituting `{name}` placeholders.
    ///
    /// An endpoint that is not in the catalog is treated as a literal path.
    #[must_use]
    pub fn endpoint_url(self, endpoint: &str, params: &[(&str, &str)]) -> String {
        let mut path = self.endpoint(endpoint).unwrap_or(endpoint).to_string();
        for (key, value) in params {
            path = path.replace(&format!("{{{key}}}"), value);
        }
        format!("{}{path}", self.base_url())
    }
}

impl fmt::Display for DemoApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DemoApi {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::all()
            .iter()
            .copied()
            .find(|api| api.key() == normalized)
            .ok_or_else(|| DomainError::UnknownApi(s.to_string()))
    }
}

/// Builds a URL from a catalog key, as scenario data files refer to APIs by name.
///
/// # Errors
///
/// Returns `DomainError::UnknownApi` if `api` is not in the catalog.
pub fn endpoint_url(api: &str, endpoint: &str, params: &[(&str, &str)]) -> DomainResult<String> {
    Ok(api.parse::<DemoApi>()?.endpoint_url(endpoint, params))
}
