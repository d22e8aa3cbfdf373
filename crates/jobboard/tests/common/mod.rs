//! Shared test utilities for jobboard integration tests.
//!
//! - `TestHarness` owns a temp directory with a file-backed database
//! - builders assemble seed documents without repetitive struct literals

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::TestHarness;
