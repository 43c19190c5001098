//! x86 Simulation Modes.
//!
//! This module defines the processor modes the simulator can run in. It implements:
//! 1. **Mode Classification:** Real (16-bit), Protected (32-bit) and Long (64-bit) modes.
//! 2. **Mode Limits:** Register count, widest addressable register and prefix legality.
//! 3. **Observability:** Human-readable naming and display formatting.

use serde::Deserialize;

/// Processor mode the simulator decodes for.
///
/// Fixed at construction; changing it requires a `reset()` before the CPU may be used again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Mode {
    /// 16-bit real mode.
    Real = 1,

    /// 32-bit protected mode.
    Protected = 2,

    /// 64-bit long mode.
    #[default]
    Long = 3,
}

impl Mode {
    /// Largest register width the mode can address, in bits (`8 << mode`).
    pub const fn max_width(self) -> u32 {
        8 << (self as u32)
    }

    /// Number of general-purpose register slots (8, or 16 in Long mode).
    pub const fn register_count(self) -> usize {
        match self {
            Self::Real | Self::Protected => 8,
            Self::Long => 16,
        }
    }

    /// Whether REX prefixes (`0x40..=0x4F`) are recognised.
    pub const fn allows_rex(self) -> bool {
        matches!(self, Self::Long)
    }

    /// Whether the `0x0F` escape and the `0x66` / `0x67` prefixes are recognised.
    pub const fn allows_extended_prefixes(self) -> bool {
        !matches!(self, Self::Real)
    }

    /// Returns the human-readable name of the mode.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Real => "Real",
            Self::Protected => "Protected",
            Self::Long => "Long",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
