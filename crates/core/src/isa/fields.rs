//! Instruction field extraction.
//!
//! Provides the small value types handlers and the address-generation unit use to pick apart
//! prefix and operand-encoding bytes:
//! 1. **REX:** The W/R/X/B bits of a Long-mode REX prefix.
//! 2. **ModRM:** `mod` (operand form), `reg` (register / opcode extension), `rm` (register or
//!    memory base).
//! 3. **SIB:** `scale`, `index`, `base` of an indexed memory operand.

use crate::common::constants::{
    FIELD_MASK, MOD_MASK, MOD_REGISTER, MODRM_MOD_SHIFT, MODRM_REG_SHIFT, REX_B, REX_R, REX_W,
    REX_X,
};

/// A REX prefix byte (`0x40..=0x4F`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rex(u8);

impl Rex {
    /// Wraps a REX byte.
    pub const fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    /// Raw prefix byte.
    pub const fn byte(self) -> u8 {
        self.0
    }

    /// REX.W: 64-bit operand size.
    pub const fn w(self) -> bool {
        self.0 & REX_W != 0
    }

    /// REX.R: extends ModRM.reg.
    pub const fn r(self) -> bool {
        self.0 & REX_R != 0
    }

    /// REX.X: extends SIB.index.
    pub const fn x(self) -> bool {
        self.0 & REX_X != 0
    }

    /// REX.B: extends ModRM.rm, SIB.base or an opcode register field.
    pub const fn b(self) -> bool {
        self.0 & REX_B != 0
    }
}

/// A decoded ModRM byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModRm {
    /// Raw byte.
    pub byte: u8,
    /// Operand form (bits 6-7).
    pub mode: u8,
    /// Register operand or opcode extension (bits 3-5).
    pub reg: u8,
    /// Register or memory-base operand (bits 0-2).
    pub rm: u8,
}

impl ModRm {
    /// Splits a ModRM byte into its fields.
    pub const fn from_byte(byte: u8) -> Self {
        Self {
            byte,
            mode: (byte >> MODRM_MOD_SHIFT) & MOD_MASK,
            reg: (byte >> MODRM_REG_SHIFT) & FIELD_MASK,
            rm: byte & FIELD_MASK,
        }
    }

    /// Whether the `rm` operand is a register rather than memory (`mod == 0b11`).
    pub const fn is_register(self) -> bool {
        self.mode == MOD_REGISTER
    }
}

/// A decoded SIB byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Sib {
    /// Raw byte.
    pub byte: u8,
    /// Scale exponent (bits 6-7); the multiplier is `1 << scale`.
    pub scale: u8,
    /// Index register field (bits 3-5).
    pub index: u8,
    /// Base register field (bits 0-2).
    pub base: u8,
}

impl Sib {
    /// Splits a SIB byte into its fields.
    pub const fn from_byte(byte: u8) -> Self {
        Self {
            byte,
            scale: (byte >> MODRM_MOD_SHIFT) & MOD_MASK,
            index: (byte >> MODRM_REG_SHIFT) & FIELD_MASK,
            base: byte & FIELD_MASK,
        }
    }

    /// Index multiplier (1, 2, 4 or 8).
    pub const fn multiplier(self) -> u64 {
        1 << self.scale
    }
}

/// Decodes a little-endian two's-complement value of `bytes.len()` bytes (at most 8).
///
/// The top bit of the last byte is the sign; negative values are produced by subtracting
/// `2^n` from the unsigned reading.
pub fn signed_le(bytes: &[u8]) -> i64 {
    let n = bytes.len().min(8);
    if n == 0 {
        return 0;
    }
    let unsigned = unsigned_le(&bytes[..n]);
    let bits = (n * 8) as u32;
    if bits == 64 {
        return unsigned as i64;
    }
    let sign = 1u64 << (bits - 1);
    if unsigned & sign == 0 {
        unsigned as i64
    } else {
        unsigned as i64 - (1i64 << bits)
    }
}

/// Decodes a little-endian unsigned value of up to 8 bytes.
pub fn unsigned_le(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .take(8)
        .enumerate()
        .fold(0u64, |acc, (i, b)| acc | (u64::from(*b) << (i * 8)))
}
