//! Register and Flag Access.
//!
//! Stateful register/flag entry points (guarded by the lifecycle check) and the operand-width
//! rules handlers use to pick register views:
//! 1. **Registers:** Width-scoped reads and writes through register descriptors.
//! 2. **Resolution:** REX-aware lookup of encoded register fields.
//! 3. **Widths:** Operand, address and stack widths from mode and prefixes.
//! 4. **Flags:** Mask-based eFlags access.

use super::Cpu;
use crate::common::SimResult;
use crate::core::arch::flags::EFlags;
use crate::core::arch::gpr::RegisterFile;
use crate::core::arch::mode::Mode;
use crate::core::arch::reg::{Register, Width};

impl Cpu {
    /// Reads a register view.
    ///
    /// # Errors
    ///
    /// `TaintedEnvironment` while a reset is pending, otherwise the register file's errors.
    pub fn read_register(&self, reg: Register) -> SimResult<u64> {
        self.ensure_ready()?;
        self.regs.read(reg)
    }

    /// Writes a register view (masked to its width, zero-extended per mode rules).
    ///
    /// # Errors
    ///
    /// `TaintedEnvironment` while a reset is pending, otherwise the register file's errors.
    pub fn write_register(&mut self, reg: Register, value: u64) -> SimResult<()> {
        self.ensure_ready()?;
        self.regs.write(reg, value)
    }

    /// Read-only view of the register file.
    pub const fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// Resolves an encoded register field against the current REX prefix.
    ///
    /// # Arguments
    ///
    /// * `id` - Encoded field (ModRM.reg, ModRM.rm, SIB fields or opcode low bits).
    /// * `width` - Operand width.
    /// * `extend` - The REX bit extending this field (ignored without a REX prefix).
    pub fn register_by_code(&self, id: u8, width: Width, extend: bool) -> Register {
        let rex_present = self.prefixes.rex.is_some();
        Register::by_code(id, width, rex_present, rex_present && extend)
    }

    /// Operand width of the instruction being decoded.
    ///
    /// REX.W selects 64 bits in Long mode; otherwise `0x66` selects 16 bits outside Real mode.
    pub fn operand_width(&self) -> Width {
        match self.mode {
            Mode::Real => Width::Word,
            Mode::Long if self.prefixes.rex.is_some_and(|rex| rex.w()) => Width::Qword,
            Mode::Protected | Mode::Long if self.prefixes.operand_size => Width::Word,
            Mode::Protected | Mode::Long => Width::Dword,
        }
    }

    /// Address width of the instruction being decoded.
    ///
    /// `0x67` selects 32-bit addressing in Long mode and 16-bit addressing in Protected mode.
    pub const fn address_width(&self) -> Width {
        match (self.mode, self.prefixes.address_size) {
            (Mode::Real, _) | (Mode::Protected, true) => Width::Word,
            (Mode::Protected, false) | (Mode::Long, true) => Width::Dword,
            (Mode::Long, false) => Width::Qword,
        }
    }

    /// Width of stack pushes and pops (64-bit by default in Long mode, `0x66` selects 16).
    pub const fn stack_width(&self) -> Width {
        match (self.mode, self.prefixes.operand_size) {
            (Mode::Real, _) | (Mode::Protected | Mode::Long, true) => Width::Word,
            (Mode::Protected, false) => Width::Dword,
            (Mode::Long, false) => Width::Qword,
        }
    }

    /// Reads the flag selected by the lowest set bit of `mask`.
    pub const fn get_flag(&self, mask: u64) -> bool {
        self.flags.get(mask)
    }

    /// Sets or clears the flag selected by the lowest set bit of `mask`.
    ///
    /// # Errors
    ///
    /// `TaintedEnvironment` while a reset is pending.
    pub fn set_flag(&mut self, mask: u64, value: bool) -> SimResult<()> {
        self.ensure_ready()?;
        self.flags.set(mask, value);
        Ok(())
    }

    /// Raw eFlags bits.
    pub const fn get_flags(&self) -> u64 {
        self.flags.bits()
    }

    /// Mutable eFlags, for handlers updating several flags at once.
    pub fn flags_mut(&mut self) -> &mut EFlags {
        &mut self.flags
    }
}
