//! eFlags Register.
//!
//! A single bitmask holding the status and control flags. Flags are addressed by mask and the
//! accessors isolate the lowest set bit of the mask (`mask & -mask`), so any single-bit mask
//! works regardless of where the flag sits.

/// Carry flag.
pub const CF: u64 = 1 << 0;
/// Parity flag (even parity of the result's low byte).
pub const PF: u64 = 1 << 2;
/// Auxiliary carry flag.
pub const AF: u64 = 1 << 4;
/// Zero flag.
pub const ZF: u64 = 1 << 6;
/// Sign flag.
pub const SF: u64 = 1 << 7;
/// Trap flag.
pub const TF: u64 = 1 << 8;
/// Interrupt enable flag.
pub const IF: u64 = 1 << 9;
/// Direction flag.
pub const DF: u64 = 1 << 10;
/// Overflow flag.
pub const OF: u64 = 1 << 11;

/// The eFlags register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EFlags {
    bits: u64,
}

impl EFlags {
    /// Creates a flags register with every flag clear.
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Raw flag bits.
    pub const fn bits(&self) -> u64 {
        self.bits
    }

    /// Reads the flag selected by the lowest set bit of `mask`.
    pub const fn get(&self, mask: u64) -> bool {
        self.bits & isolate(mask) != 0
    }

    /// Sets or clears the flag selected by the lowest set bit of `mask`.
    pub fn set(&mut self, mask: u64, value: bool) {
        let bit = isolate(mask);
        if value {
            self.bits |= bit;
        } else {
            self.bits &= !bit;
        }
    }

    /// Clears every flag.
    pub fn clear(&mut self) {
        self.bits = 0;
    }
}

/// Lowest set bit of `mask` (`mask & -mask`).
const fn isolate(mask: u64) -> u64 {
    mask & mask.wrapping_neg()
}
