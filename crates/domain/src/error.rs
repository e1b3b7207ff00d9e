//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The query string could not be encoded.
    #[error("invalid query parameters: {0}")]
    InvalidQuery(String),

    /// The demo API name is not in the catalog.
    #[error("unknown API: {0}")]
    UnknownApi(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
