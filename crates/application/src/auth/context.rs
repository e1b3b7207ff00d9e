//! Shared bearer-token context for a test run.

use std::sync::Arc;

use parking_lot::RwLock;

/// Holds the most recently obtained bearer token.
///
/// Cloning yields another handle to the same slot, so a context created by
/// the test run can be handed to the executor and to login helpers alike.
/// Writes replace the whole value in one assignment under the lock; readers
/// always see either the previous token or the new one. There is no expiry
/// or refresh.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    token: Arc<RwLock<Option<String>>>,
}

impl AuthContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context seeded with `token`, e.g. from `AUTH_TOKEN`.
    #[must_use]
    pub fn seeded(token: Option<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(token)),
        }
    }

    /// Stores `token`, replacing any previous value.
    pub fn record_token(&self, token: impl Into<String>) {
        let token = token.into();
        tracing::debug!(token_len = token.len(), "recorded bearer token");
        *self.token.write() = Some(token);
    }

    /// Returns the current token, if one has been recorded.
    #[must_use]
    pub fn current_token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Returns true if a token is present.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.read().is_some()
    }

    /// Forgets the current token.
    pub fn clear(&self) {
        *self.token.write() = None;
    }
}
