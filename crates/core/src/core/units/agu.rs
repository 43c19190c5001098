//! Address Generation Unit.
//!
//! Resolves the memory operand selected by a ModRM byte (plus optional SIB byte and
//! displacement) into an effective address. Three forms are recognised:
//! 1. **Direct:** `base + displacement`, the base chosen by ModRM.rm.
//! 2. **Indexed:** `index * scale + base + displacement` from a SIB byte (ModRM.rm = `0b100`).
//! 3. **RIP-relative:** `anchor + 4 + displacement` (Long mode, mod `00`, rm `0b101`).
//!
//! Register values are captured at resolution time; the final sum wraps to the effective
//! address width.

use crate::common::constants::{DISP32_SIZE, RM_DISP32, RM_SIB, SIB_NO_BASE, SIB_NO_INDEX};
use crate::common::{SimError, SimResult};
use crate::core::Cpu;
use crate::core::arch::mode::Mode;
use crate::core::arch::reg::{Register, Width};
use crate::isa::fields::{ModRm, Sib};

/// Which encoding produced an effective address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressForm {
    /// Base register (or absolute disp32) plus displacement.
    Direct,
    /// SIB-encoded scaled index plus base plus displacement.
    Indexed,
    /// Displacement relative to the end of the displacement field.
    RipRelative,
}

/// A resolved memory operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectiveAddress {
    /// Encoding form.
    pub form: AddressForm,
    /// Base register, if any.
    pub base: Option<Register>,
    /// Index register, if any (indexed form only).
    pub index: Option<Register>,
    /// Index multiplier (1, 2, 4 or 8).
    pub scale: u64,
    /// Sign-extended displacement.
    pub displacement: i64,
    /// Encoded displacement size in bytes (0, 1 or 4).
    pub displacement_size: usize,
    /// Address width the sum wraps to.
    pub width: Width,
    base_value: u64,
    index_value: u64,
}

impl EffectiveAddress {
    /// Final address, with `extra` added before wrapping to the address width.
    ///
    /// `extra` lets a handler account for bytes that follow the displacement (immediates) when
    /// the operand is RIP-relative.
    pub const fn address(&self, extra: i64) -> u64 {
        let sum = self
            .base_value
            .wrapping_add(self.index_value.wrapping_mul(self.scale))
            .wrapping_add(self.displacement as u64)
            .wrapping_add(extra as u64);
        sum & self.width.mask()
    }

    /// Encoded displacement size in bytes.
    pub const fn displacement_size(&self) -> usize {
        self.displacement_size
    }

    /// Bytes following the ModRM byte that belong to this operand (SIB + displacement).
    pub const fn encoded_len(&self) -> usize {
        match self.form {
            AddressForm::Indexed => 1 + self.displacement_size,
            AddressForm::Direct | AddressForm::RipRelative => self.displacement_size,
        }
    }
}

/// Displacement size selected by ModRM.mod for memory forms.
const fn displacement_size(modrm: ModRm) -> usize {
    match modrm.mode {
        0b01 => 1,
        0b10 => DISP32_SIZE,
        _ => 0,
    }
}

fn read_optional(cpu: &Cpu, reg: Option<Register>) -> SimResult<u64> {
    reg.map_or(Ok(0), |reg| cpu.read_register(reg))
}

/// Resolves the memory operand encoded by `modrm`.
///
/// # Arguments
///
/// * `cpu` - CPU state supplying registers, prefixes and the code buffer.
/// * `modrm` - The instruction's ModRM byte.
/// * `position` - Code-buffer offset of the byte following ModRM (SIB or displacement).
///
/// # Returns
///
/// The effective address; callers advance the instruction pointer by
/// [`EffectiveAddress::encoded_len`].
///
/// # Errors
///
/// `InvalidAddressingMode` for a register-direct ModRM, `TruncatedInstruction` when the SIB
/// byte or displacement runs past the code buffer, or register access errors.
pub fn resolve(cpu: &Cpu, modrm: ModRm, position: usize) -> SimResult<EffectiveAddress> {
    if modrm.is_register() {
        return Err(SimError::InvalidAddressingMode { modrm: modrm.byte });
    }

    let width = cpu.address_width();
    let rex = cpu.rex();
    let rex_b = rex.is_some_and(|r| r.b());

    if modrm.rm == RM_SIB {
        let sib = Sib::from_byte(cpu.fetch_u8(position)?);
        let rex_x = rex.is_some_and(|r| r.x());
        let index = (sib.index != SIB_NO_INDEX || rex_x)
            .then(|| cpu.register_by_code(sib.index, width, rex_x));
        let (base, displacement_size) = if sib.base == SIB_NO_BASE && modrm.mode == 0b00 {
            (None, DISP32_SIZE)
        } else {
            (
                Some(cpu.register_by_code(sib.base, width, rex_b)),
                displacement_size(modrm),
            )
        };
        let displacement = cpu.fetch_signed(position + 1, displacement_size)?;
        return Ok(EffectiveAddress {
            form: AddressForm::Indexed,
            base,
            index,
            scale: sib.multiplier(),
            displacement,
            displacement_size,
            width,
            base_value: read_optional(cpu, base)?,
            index_value: read_optional(cpu, index)?,
        });
    }

    if modrm.rm == RM_DISP32 && modrm.mode == 0b00 {
        let displacement = cpu.fetch_signed(position, DISP32_SIZE)?;
        let (form, base_value) = if cpu.mode() == Mode::Long {
            let anchor = cpu.absolute_address(position);
            (AddressForm::RipRelative, anchor.wrapping_add(DISP32_SIZE as u64))
        } else {
            (AddressForm::Direct, 0)
        };
        return Ok(EffectiveAddress {
            form,
            base: None,
            index: None,
            scale: 1,
            displacement,
            displacement_size: DISP32_SIZE,
            width,
            base_value,
            index_value: 0,
        });
    }

    let base = cpu.register_by_code(modrm.rm, width, rex_b);
    let displacement_size = displacement_size(modrm);
    let displacement = cpu.fetch_signed(position, displacement_size)?;
    Ok(EffectiveAddress {
        form: AddressForm::Direct,
        base: Some(base),
        index: None,
        scale: 1,
        displacement,
        displacement_size,
        width,
        base_value: cpu.read_register(base)?,
        index_value: 0,
    })
}
