//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to parameterize a [`Simulator`].
//! It provides:
//! 1. **Defaults:** Baseline constants (mode, stack top, stack size, step bound).
//! 2. **Structures:** A root `Config` holding the mode, stack parameters and run limits.
//! 3. **Enums:** The stack policy selector.
//!
//! Configuration is deserialized from JSON by embedding tools, or use `Config::default()`.
//!
//! [`Simulator`]: crate::sim::Simulator

use serde::Deserialize;

use crate::core::arch::mode::Mode;

/// Default configuration constants for the simulator.
mod defaults {
    /// Highest stack address (fits every mode, including 16-bit Real mode).
    pub const STACK_TOP: u64 = 0xFFFF;

    /// Maximum stack size in bytes (4 KiB).
    pub const STACK_SIZE: usize = 0x1000;

    /// Address added to the instruction pointer to form absolute addresses.
    pub const ADDRESS_BASE: u64 = 0;

    /// Maximum number of instructions a single `simulate()` run may execute.
    ///
    /// Input buffers may be adversarial; without a bound only buffer exhaustion or an
    /// unhandled opcode would stop a run.
    pub const MAX_STEPS: u64 = 1_000_000;
}

/// Stack behaviour on out-of-bounds accesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum StackPolicyKind {
    /// Every bounds violation is a fatal error.
    #[default]
    Strict,
    /// Bounds violations are absorbed (empty reads, no-op writes); overflow is still fatal.
    Forgiving,
    /// Configuration is ignored: reads return zeroes, writes and clears do nothing.
    Null,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use x86sim_core::config::{Config, StackPolicyKind};
/// use x86sim_core::core::arch::mode::Mode;
///
/// let json = r#"{
///     "mode": "Protected",
///     "stack": { "policy": "Forgiving", "top_address": 16, "max_size": 127 },
///     "address_base": 4198400
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.mode, Mode::Protected);
/// assert_eq!(config.stack.policy, StackPolicyKind::Forgiving);
/// assert_eq!(config.stack.top_address, 0x10);
/// assert_eq!(config.address_base, 0x40_1000);
/// assert_eq!(config.max_steps, Some(1_000_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Simulation mode (register count, prefix legality, widest register).
    #[serde(default)]
    pub mode: Mode,
    /// Stack bounds and policy.
    #[serde(default)]
    pub stack: StackConfig,
    /// Base added to the instruction pointer when forming absolute addresses.
    #[serde(default = "Config::default_address_base")]
    pub address_base: u64,
    /// Instruction bound per `simulate()` run; `None` disables it.
    #[serde(default = "Config::default_max_steps")]
    pub max_steps: Option<u64>,
}

impl Config {
    fn default_address_base() -> u64 {
        defaults::ADDRESS_BASE
    }

    #[allow(clippy::unnecessary_wraps)]
    fn default_max_steps() -> Option<u64> {
        Some(defaults::MAX_STEPS)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            stack: StackConfig::default(),
            address_base: Self::default_address_base(),
            max_steps: Self::default_max_steps(),
        }
    }
}

/// Stack configuration.
///
/// The stack occupies addresses up to and including `top_address` and grows downward, holding
/// at most `max_size` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StackConfig {
    /// Out-of-bounds behaviour.
    #[serde(default)]
    pub policy: StackPolicyKind,
    /// Highest addressable stack byte.
    #[serde(default = "StackConfig::default_top_address")]
    pub top_address: u64,
    /// Maximum number of bytes the stack may hold.
    #[serde(default = "StackConfig::default_max_size")]
    pub max_size: usize,
}

impl StackConfig {
    fn default_top_address() -> u64 {
        defaults::STACK_TOP
    }

    fn default_max_size() -> usize {
        defaults::STACK_SIZE
    }

    /// Stack pointer value of an empty stack (one past the top address).
    pub fn initial_pointer(&self) -> u64 {
        self.top_address.wrapping_add(1)
    }
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            policy: StackPolicyKind::default(),
            top_address: Self::default_top_address(),
            max_size: Self::default_max_size(),
        }
    }
}
