//! Response testing and assertions.
//!
//! This module provides the expectation types and the assertion helpers
//! scenarios run against responses.

mod assert;
mod expectation;
mod failure;
mod schema;

pub use assert::{
    AssertionOutcome, assert_api_response, assert_error_shape, assert_json_content_type,
    assert_response_time, assert_shape, assert_status, assert_status_in,
};
pub use expectation::StatusExpectation;
pub use failure::{AssertionFailure, FailureKind};
pub use schema::{ShapeHint, ShapeSchema};
