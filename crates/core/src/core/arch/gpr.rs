//! x86 General-Purpose Register File.
//!
//! This module implements the register slots behind every register descriptor. It performs:
//! 1. **Storage:** 8 slots (Real/Protected) or 16 slots (Long) of raw 64-bit values.
//! 2. **Aliasing:** Width-scoped reads and merges, so AL/AH/AX/EAX/RAX share one slot.
//! 3. **Zero-Extension:** 32- and 64-bit writes in Long mode replace the whole slot.
//! 4. **Validation:** Registers wider than the mode, or absent from it, are rejected.

use tracing::debug;

use super::mode::Mode;
use super::reg::Register;
use crate::common::{SimError, SimResult};

/// Width at or above which a Long-mode write replaces the entire slot.
const NATURAL_WRITE_BITS: u32 = 32;

/// General-purpose register file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    mode: Mode,
    slots: [u64; 16],
}

impl RegisterFile {
    /// Creates a register file for `mode` with every slot zeroed.
    pub const fn new(mode: Mode) -> Self {
        Self {
            mode,
            slots: [0; 16],
        }
    }

    /// Mode the register file was built for.
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Reads a register view: `(slot >> shift) & mask`.
    ///
    /// # Errors
    ///
    /// `RegisterUnavailable` if the slot does not exist in this mode, and
    /// `RegisterWidthExceedsMode` if the view is wider than the mode allows.
    pub fn read(&self, reg: Register) -> SimResult<u64> {
        self.check(reg)?;
        Ok((self.slots[reg.slot] >> reg.shift) & reg.mask())
    }

    /// Writes a register view.
    ///
    /// The value is first masked to the view's width. In Long mode a 32- or 64-bit write
    /// replaces the whole slot (a 32-bit write clears bits 32-63); every other write merges into
    /// the view's bits and leaves the rest of the slot untouched.
    ///
    /// # Errors
    ///
    /// Same as [`RegisterFile::read`].
    pub fn write(&mut self, reg: Register, value: u64) -> SimResult<()> {
        self.check(reg)?;
        let value = value & reg.mask();
        let slot = &mut self.slots[reg.slot];
        if self.mode == Mode::Long && reg.bits() >= NATURAL_WRITE_BITS {
            *slot = value;
        } else {
            let field = reg.mask() << reg.shift;
            *slot = (*slot & !field) | (value << reg.shift);
        }
        Ok(())
    }

    /// Overwrites a raw slot, regardless of mode. Out-of-range slots are ignored.
    pub fn set_slot(&mut self, slot: usize, value: u64) {
        if let Some(s) = self.slots.get_mut(slot) {
            *s = value;
        }
    }

    /// Logs every visible slot at debug level.
    pub fn dump(&self) {
        for pair in self.slots[..self.mode.register_count()].chunks(2).enumerate() {
            let (i, values) = pair;
            debug!(
                "r{:<2}={:#018x} r{:<2}={:#018x}",
                i * 2,
                values[0],
                i * 2 + 1,
                values[1]
            );
        }
    }

    fn check(&self, reg: Register) -> SimResult<()> {
        if reg.slot >= self.mode.register_count() {
            return Err(SimError::RegisterUnavailable {
                register: reg.name,
                mode: self.mode,
            });
        }
        if reg.bits() > self.mode.max_width() {
            return Err(SimError::RegisterWidthExceedsMode {
                register: reg.name,
                width: reg.bits(),
                mode: self.mode,
            });
        }
        Ok(())
    }
}
