//! ModRM Operand Decoding.
//!
//! Turns a ModRM byte into its two operands: the `reg` register and the `rm` operand, which
//! is either a register or a memory address produced by the address-generation unit. Memory
//! operands live on the simulated stack.

use crate::common::SimResult;
use crate::core::Cpu;
use crate::core::arch::reg::{Register, Width};
use crate::core::units::agu::{self, AddressForm};
use crate::isa::fields::ModRm;

/// The `rm` side of a ModRM encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// Register-direct (`mod == 0b11`).
    Register(Register),
    /// Memory at the given effective address.
    Memory(u64),
}

/// Decoded operands of a ModRM-encoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModRmOperands {
    /// The ModRM byte.
    pub modrm: ModRm,
    /// Register selected by ModRM.reg (extended by REX.R).
    pub reg: Register,
    /// Register or memory operand selected by ModRM.mod/rm.
    pub rm: Operand,
    /// Operand width.
    pub width: Width,
    /// Encoded length of ModRM, SIB and displacement.
    pub len: usize,
}

impl ModRmOperands {
    /// Decodes the ModRM byte at `position`.
    ///
    /// # Arguments
    ///
    /// * `cpu` - CPU state (code buffer, prefixes, registers).
    /// * `position` - Code-buffer offset of the ModRM byte.
    /// * `width` - Operand width of both operands.
    /// * `trailing` - Immediate bytes following the displacement (RIP-relative correction).
    ///
    /// # Errors
    ///
    /// Truncated encodings or register access errors from address resolution.
    pub fn decode(cpu: &Cpu, position: usize, width: Width, trailing: usize) -> SimResult<Self> {
        let modrm = ModRm::from_byte(cpu.fetch_u8(position)?);
        let rex = cpu.rex();
        let reg = cpu.register_by_code(modrm.reg, width, rex.is_some_and(|r| r.r()));
        let (rm, len) = if modrm.is_register() {
            let rm = cpu.register_by_code(modrm.rm, width, rex.is_some_and(|r| r.b()));
            (Operand::Register(rm), 1)
        } else {
            let ea = agu::resolve(cpu, modrm, position + 1)?;
            let extra = match ea.form {
                AddressForm::RipRelative => trailing as i64,
                AddressForm::Direct | AddressForm::Indexed => 0,
            };
            (Operand::Memory(ea.address(extra)), 1 + ea.encoded_len())
        };
        Ok(Self {
            modrm,
            reg,
            rm,
            width,
            len,
        })
    }

    /// Reads the `rm` operand.
    ///
    /// # Errors
    ///
    /// Register or stack access errors.
    pub fn read_rm(&self, cpu: &Cpu) -> SimResult<u64> {
        match self.rm {
            Operand::Register(reg) => cpu.read_register(reg),
            Operand::Memory(address) => cpu.read_memory(address, self.width),
        }
    }

    /// Writes the `rm` operand.
    ///
    /// # Errors
    ///
    /// Register or stack access errors.
    pub fn write_rm(&self, cpu: &mut Cpu, value: u64) -> SimResult<()> {
        match self.rm {
            Operand::Register(reg) => cpu.write_register(reg, value),
            Operand::Memory(address) => cpu.write_memory(address, self.width, value),
        }
    }
}
