//! Expected status codes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Expected status code value, set or range.
///
/// Third-party demo APIs do not always answer the same way (anti-bot
/// challenges turn a 200 into a 403), so scenarios can accept a set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatusExpectation {
    /// Exact status code.
    Exact(u16),
    /// Range of status codes (e.g., 200-299).
    Range {
        /// Minimum status code (inclusive).
        min: u16,
        /// Maximum status code (inclusive).
        max: u16,
    },
    /// One of multiple status codes.
    OneOf(Vec<u16>),
}

impl StatusExpectation {
    /// Check if a status code matches this expectation.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == *expected,
            Self::Range { min, max } => (*min..=*max).contains(&status),
            Self::OneOf(codes) => codes.contains(&status),
        }
    }

    /// Create a "success" expectation (200-299).
    #[must_use]
    pub const fn success() -> Self {
        Self::Range { min: 200, max: 299 }
    }

    /// Create an exact status expectation.
    #[must_use]
    pub const fn exact(code: u16) -> Self {
        Self::Exact(code)
    }

    /// Create a set expectation.
    #[must_use]
    pub fn one_of(codes: impl IntoIterator<Item = u16>) -> Self {
        Self::OneOf(codes.into_iter().collect())
    }
}

impl Default for StatusExpectation {
    fn default() -> Self {
        Self::success()
    }
}

impl From<u16> for StatusExpectation {
    fn from(code: u16) -> Self {
        Self::Exact(code)
    }
}

impl<const N: usize> From<[u16; N]> for StatusExpectation {
    fn from(codes: [u16; N]) -> Self {
        Self::OneOf(codes.to_vec())
    }
}

impl fmt::Display for StatusExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(code) => write!(f, "{code}"),
            Self::Range { min, max } => write!(f, "{min}-{max}"),
            Self::OneOf(codes) => {
                let codes: Vec<_> = codes.iter().map(ToString::to_string).collect();
                write!(f, "one of [{}]", codes.join(", "))
            }
        }
    }
}
