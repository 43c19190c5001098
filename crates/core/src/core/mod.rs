//! Core processor implementation.
//!
//! This module contains the architectural state of the simulated CPU together with the
//! execution units handlers use to compute addresses, flags and stack accesses.

/// Architecture-specific components (modes, register descriptors, register file, flags).
pub mod arch;

/// CPU architectural state and lifecycle.
pub mod cpu;

/// Execution units (address generation, ALU flag logic, stack).
pub mod units;

pub use self::cpu::Cpu;
