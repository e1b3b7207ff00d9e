//! HTTP Request domain types

mod header;
mod method;
mod options;
mod prepared;
mod query;
mod spec;

pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use options::RequestOptions;
pub use prepared::PreparedRequest;
pub use query::{QueryParams, QueryValue};
pub use spec::RequestSpec;
