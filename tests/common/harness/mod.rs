//! Test harness for integration tests.
//!
//! Provides isolated run environments pointed at the `notes-fixture` binary
//! and CLI assertion helpers using `assert_cmd`.

mod command;
mod env;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::{FixtureCommand, HarnessCommand};
#[allow(unused_imports)]
pub use env::TestEnv;
