//! Per-run wiring of settings, auth state and the HTTP adapter.

use std::sync::Arc;

use apiprobe_application::{AuthContext, ExecuteRequest, HttpClientError, ProbeSettings};
use apiprobe_domain::DemoApi;
use apiprobe_infrastructure::{ConfigError, ReqwestHttpClient, init_tracing, load_settings};
use thiserror::Error;

/// Errors from setting up a test run.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Settings could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] HttpClientError),
}

/// Everything one test run shares: settings, auth context and executor.
///
/// Each `TestRun` owns a fresh [`AuthContext`], seeded from `AUTH_TOKEN`.
pub struct TestRun {
    executor: ExecuteRequest<ReqwestHttpClient>,
}

impl TestRun {
    /// Builds a run from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `SetupError` if settings are invalid or the client cannot be built.
    pub fn from_env() -> Result<Self, SetupError> {
        Self::with_settings(load_settings()?)
    }

    /// Builds a run from the environment, pointed at one of the demo APIs.
    ///
    /// # Errors
    ///
    /// Returns `SetupError` if settings are invalid or the client cannot be built.
    pub fn for_api(api: DemoApi) -> Result<Self, SetupError> {
        Self::with_settings(load_settings()?.with_base_url(api.base_url()))
    }

    /// Builds a run from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns `SetupError::Client` if the client cannot be built.
    pub fn with_settings(settings: ProbeSettings) -> Result<Self, SetupError> {
        init_tracing();
        let client = ReqwestHttpClient::from_settings(&settings)?;
        let auth = AuthContext::seeded(settings.auth_token().map(str::to_string));
        tracing::debug!(base_url = %settings.api_base_url, "test run ready");
        Ok(Self {
            executor: ExecuteRequest::new(Arc::new(client), settings, auth),
        })
    }

    /// Returns the executor.
    #[must_use]
    pub const fn executor(&self) -> &ExecuteRequest<ReqwestHttpClient> {
        &self.executor
    }

    /// Returns the run's auth context.
    #[must_use]
    pub const fn auth(&self) -> &AuthContext {
        self.executor.auth()
    }
}
