//! JSON fixture loading.
//!
//! Fixtures are plain `<name>.json` files. Values inside them are addressed
//! with dotted paths such as `reqres.validUser`; numeric segments index
//! into arrays.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Directory holding the fixtures bundled with this crate.
pub const BUNDLED_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures");

/// Errors from loading or reading fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The fixture file could not be read.
    #[error("failed to read fixture {path}: {source}")]
    Read {
        /// File that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The fixture file is not valid JSON.
    #[error("fixture {path} is not valid JSON: {source}")]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// No value exists at the requested path.
    #[error("fixture `{fixture}` has no value at `{path}`")]
    MissingPath {
        /// Fixture name.
        fixture: String,
        /// Dotted path that was looked up.
        path: String,
    },
}

/// A loaded fixture document.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixtures {
    name: String,
    root: Value,
}

impl Fixtures {
    /// Loads `<dir>/<name>.json`.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::Read` or `FixtureError::Parse`.
    pub fn load(dir: impl AsRef<Path>, name: &str) -> Result<Self, FixtureError> {
        let path = dir.as_ref().join(format!("{name}.json"));
        let content = std::fs::read_to_string(&path).map_err(|source| FixtureError::Read {
            path: path.clone(),
            source,
        })?;
        let root = serde_json::from_str(&content)
            .map_err(|source| FixtureError::Parse { path, source })?;
        Ok(Self {
            name: name.to_string(),
            root,
        })
    }

    /// Loads one of the fixtures shipped in this crate's `fixtures/` directory.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::Read` or `FixtureError::Parse`.
    pub fn bundled(name: &str) -> Result<Self, FixtureError> {
        Self::load(BUNDLED_DIR, name)
    }

    /// Returns the fixture name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the whole document.
    #[must_use]
    pub const fn root(&self) -> &Value {
        &self.root
    }

    /// Looks up a dotted path; an empty path returns the root.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::MissingPath` if any segment is absent.
    pub fn get(&self, path: &str) -> Result<&Value, FixtureError> {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(&self.root, |value, segment| match value {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
            .ok_or_else(|| FixtureError::MissingPath {
                fixture: self.name.clone(),
                path: path.to_string(),
            })
    }

    /// Returns an owned copy of the value at `path`, ready to use as a body.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::MissingPath` if any segment is absent.
    pub fn body(&self, path: &str) -> Result<Value, FixtureError> {
        self.get(path).cloned()
    }

    /// Looks up a string value.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::MissingPath` if the path is absent or not a string.
    pub fn get_str(&self, path: &str) -> Result<&str, FixtureError> {
        self.get(path)?
            .as_str()
            .ok_or_else(|| FixtureError::MissingPath {
                fixture: self.name.clone(),
                path: path.to_string(),
            })
    }
}
