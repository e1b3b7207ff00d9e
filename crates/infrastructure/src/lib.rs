//! Apiprobe Infrastructure - Adapters and implementations
//!
//! This crate provides the reqwest-backed `HttpClient`, environment
//! settings loading and log setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::ReqwestHttpClient;
pub use crate::config::{ConfigError, load_settings, load_settings_from};
pub use telemetry::init_tracing;
