//! Fully resolved request, ready for the wire

use serde_json::Value;
use url::Url;

use super::{Headers, HttpMethod};

/// A request after URL resolution and header merging.
///
/// This is what an HTTP client port receives; nothing about it depends on
/// configuration or shared auth state any more.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute URL including the query string
    pub url: Url,
    /// Final header set
    pub headers: Headers,
    /// Body to serialize; `None` sends no body at all
    pub body: Option<Value>,
}

impl PreparedRequest {
    /// Serializes the body to bytes, if there is one.
    ///
    /// # Errors
    ///
    /// Returns the serializer error for values that cannot be encoded.
    pub fn body_bytes(&self) -> Result<Option<Vec<u8>>, serde_json::Error> {
        self.body.as_ref().map(serde_json::to_vec).transpose()
    }
}
