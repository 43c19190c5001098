//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Constants:** Prefix bytes, the two-byte escape, ModRM/SIB/REX field masks.
//! 2. **Error Handling:** The crate-wide `SimError` type and `SimResult` alias.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error type for decoding, dispatch, register, stack and loader failures.
pub mod error;

pub use error::{SimError, SimResult};
