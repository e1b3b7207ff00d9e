//! Shallow response shape descriptions.

use serde::{Deserialize, Serialize};

/// Coarse expectation about a single top-level field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeHint {
    /// The field must be present; any value is accepted.
    Exists,
    /// The field must be present and hold a JSON object.
    Object,
}

/// Ordered set of top-level field expectations.
///
/// Only key presence and the object/non-object distinction are checked;
/// nested fields are never inspected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeSchema {
    fields: Vec<(String, ShapeHint)>,
}

impl ShapeSchema {
    /// Creates an empty schema.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Creates a schema requiring each of `names` to exist.
    #[must_use]
    pub fn exists<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().fold(Self::new(), |schema, name| schema.field(name, ShapeHint::Exists))
    }

    /// Adds a field expectation; a repeated name replaces the earlier hint.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, hint: ShapeHint) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = hint,
            None => self.fields.push((name, hint)),
        }
        self
    }

    /// Returns the field expectations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ShapeHint)> {
        self.fields.iter().map(|(name, hint)| (name.as_str(), *hint))
    }

    /// Returns the number of fields.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema has no fields.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
