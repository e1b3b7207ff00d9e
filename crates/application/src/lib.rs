//! Apiprobe Application - Use cases and ports
//!
//! This crate contains the request executor, the shared auth context and
//! the port traits that infrastructure adapters implement.

pub mod auth;
pub mod execute_request;
pub mod ports;
pub mod settings;
pub mod use_cases;

pub use auth::AuthContext;
pub use execute_request::{ExecuteRequest, ExecuteResult, RequestFailure};
pub use ports::{HttpClient, HttpClientError, HttpFuture};
pub use settings::{DEFAULT_TIMEOUT_MS, ProbeSettings};
pub use use_cases::{LoginError, PollError, PollOptions, extract_token, login, wait_until};
