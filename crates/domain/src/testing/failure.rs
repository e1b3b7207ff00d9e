//! Assertion failures.

use thiserror::Error;

use super::{ShapeHint, StatusExpectation};

/// Category of an [`AssertionFailure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The status code was not the expected one.
    StatusMismatch,
    /// The content type was not JSON.
    ContentTypeMismatch,
    /// A required field was absent.
    MissingField,
    /// A field had the wrong coarse type.
    TypeMismatch,
    /// An error message did not contain the expected text.
    MessageMismatch,
    /// The response took longer than allowed.
    SlowResponse,
}

/// A failed expectation about a response, with expected and actual values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionFailure {
    /// The status code did not match.
    #[error("status mismatch: expected {expected}, got {actual}")]
    StatusMismatch {
        /// What was expected.
        expected: StatusExpectation,
        /// What the response carried.
        actual: u16,
    },

    /// The `Content-Type` header did not name JSON.
    #[error("content type mismatch: expected '{expected}', got {}", describe_content_type(.actual))]
    ContentTypeMismatch {
        /// Expected media type.
        expected: String,
        /// Header value, if any.
        actual: Option<String>,
    },

    /// A required top-level field is absent.
    #[error("missing field '{field}'")]
    MissingField {
        /// Field name.
        field: String,
    },

    /// A field is present but of the wrong kind.
    #[error("type mismatch for field '{field}': expected {expected:?}, got {actual}")]
    TypeMismatch {
        /// Field name.
        field: String,
        /// Expected shape.
        expected: ShapeHint,
        /// JSON type actually found.
        actual: String,
    },

    /// The error message did not contain the expected text.
    #[error("message mismatch: expected to contain '{expected}', got '{actual}'")]
    MessageMismatch {
        /// Expected substring.
        expected: String,
        /// Actual message.
        actual: String,
    },

    /// The response was slower than the allowed ceiling.
    #[error("slow response: expected at most {max_ms}ms, took {actual_ms}ms")]
    SlowResponse {
        /// Ceiling in milliseconds.
        max_ms: u64,
        /// Observed time in milliseconds.
        actual_ms: u64,
    },
}

#[allow(clippy::ref_option)]
fn describe_content_type(actual: &Option<String>) -> String {
    actual
        .as_deref()
        .map_or_else(|| "no Content-Type header".to_string(), |a| format!("'{a}'"))
}

impl AssertionFailure {
    /// Returns the category of this failure.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::StatusMismatch { .. } => FailureKind::StatusMismatch,
            Self::ContentTypeMismatch { .. } => FailureKind::ContentTypeMismatch,
            Self::MissingField { .. } => FailureKind::MissingField,
            Self::TypeMismatch { .. } => FailureKind::TypeMismatch,
            Self::MessageMismatch { .. } => FailureKind::MessageMismatch,
            Self::SlowResponse { .. } => FailureKind::SlowResponse,
        }
    }

    /// Returns the offending field name for field-level failures.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field } | Self::TypeMismatch { field, .. } => Some(field),
            _ => None,
        }
    }
}
