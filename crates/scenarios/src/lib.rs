//! Apiprobe Scenarios - Test-run harness
//!
//! Wires settings, the shared auth context and the reqwest adapter into a
//! ready-to-use executor, and loads the JSON fixtures scenarios draw their
//! test data from.

pub mod fixtures;
mod run;

pub use fixtures::{FixtureError, Fixtures};
pub use run::{SetupError, TestRun};
