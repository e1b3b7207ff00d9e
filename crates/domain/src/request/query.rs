//! Query parameter types

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A scalar query parameter value.
///
/// Nested objects and arrays are not representable; query strings only
/// carry flat `key=value` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// A string value.
    String(String),
    /// An integer value.
    Integer(i64),
    /// A floating point value.
    Float(f64),
    /// A boolean value.
    Bool(bool),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// An ordered collection of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams {
    items: Vec<(String, QueryValue)>,
}

impl QueryParams {
    /// Creates an empty query parameter collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adds a query parameter to the collection.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.items.push((key.into(), value.into()));
    }

    /// Builder-style variant of [`QueryParams::add`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.add(key, value);
        self
    }

    /// Returns all parameters in insertion order.
    #[must_use]
    pub fn all(&self) -> &[(String, QueryValue)] {
        &self.items
    }

    /// Returns the number of parameters.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Encodes the parameters as an `application/x-www-form-urlencoded` string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuery` if a value cannot be encoded.
    pub fn encode(&self) -> DomainResult<String> {
        serde_urlencoded::to_string(&self.items)
            .map_err(|e| DomainError::InvalidQuery(e.to_string()))
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
