//! Authentication state shared across a test run.

mod context;

pub use context::AuthContext;
