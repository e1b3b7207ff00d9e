//! Apiprobe Domain - Core harness types
//!
//! This crate defines the request/response model and the response
//! assertions used by API test scenarios.
//! All types here are pure Rust with no I/O dependencies.

pub mod catalog;
pub mod error;
pub mod request;
pub mod response;
pub mod testing;

pub use catalog::DemoApi;
pub use error::{DomainError, DomainResult};
pub use request::{
    Header, Headers, HttpMethod, PreparedRequest, QueryParams, QueryValue, RequestOptions,
    RequestSpec,
};
pub use response::{ResponseBody, ResponseSpec, StatusCode};
pub use testing::{AssertionFailure, FailureKind, ShapeHint, ShapeSchema, StatusExpectation};
