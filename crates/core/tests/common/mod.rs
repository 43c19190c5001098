//! Shared test infrastructure.

/// `TestContext` and tracing setup.
pub mod harness;
