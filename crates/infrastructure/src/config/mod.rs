//! Settings loading.
//!
//! Settings come from built-in defaults overlaid with the process
//! environment: `API_BASE_URL`, `API_KEY`, `AUTH_TOKEN` and `API_TIMEOUT_MS`.
//! Variables are read as strings; only `API_TIMEOUT_MS` is converted.

use std::collections::HashMap;

use apiprobe_application::settings::{DEFAULT_TIMEOUT_MS, ProbeSettings};
use apiprobe_domain::DemoApi;
use config::{Config, Environment};
use thiserror::Error;
use url::Url;

/// Errors from loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration sources could not be merged or deserialized.
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),

    /// A value was read but is not usable.
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid {
        /// The offending key.
        key: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Loads settings from the process environment.
///
/// # Errors
///
/// Returns `ConfigError` if a variable cannot be parsed or fails validation.
pub fn load_settings() -> Result<ProbeSettings, ConfigError> {
    load(Environment::default())
}

/// Loads settings from an explicit variable map instead of the process
/// environment. Keys use the environment variable names.
///
/// # Errors
///
/// Returns `ConfigError` if a variable cannot be parsed or fails validation.
pub fn load_settings_from(vars: HashMap<String, String>) -> Result<ProbeSettings, ConfigError> {
    load(Environment::default().source(Some(vars)))
}

fn load(environment: Environment) -> Result<ProbeSettings, ConfigError> {
    let settings: ProbeSettings = Config::builder()
        .set_default("api_base_url", DemoApi::default().base_url())?
        .set_default("api_timeout_ms", DEFAULT_TIMEOUT_MS)?
        .add_source(environment)
        .build()?
        .try_deserialize()?;

    validate(&settings)?;
    tracing::debug!(
        base_url = %settings.api_base_url,
        timeout_ms = settings.api_timeout_ms,
        has_api_key = settings.api_key().is_some(),
        has_auth_token = settings.auth_token().is_some(),
        "settings loaded"
    );
    Ok(settings)
}

fn validate(settings: &ProbeSettings) -> Result<(), ConfigError> {
    let base = Url::parse(&settings.api_base_url)
        .map_err(|e| ConfigError::invalid("API_BASE_URL", e.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(
            "API_BASE_URL",
            format!("unsupported scheme `{}`", base.scheme()),
        ));
    }
    if settings.api_timeout_ms == 0 {
        return Err(ConfigError::invalid("API_TIMEOUT_MS", "must be greater than zero"));
    }
    Ok(())
}
