//! Global Decoder Constants.
//!
//! This module defines constants shared by the dispatch loop, the field extractors and the
//! reference handlers. It includes:
//! 1. **Prefix Bytes:** The two-byte escape, operand/address-size overrides and the REX range.
//! 2. **Opcode Space:** The base OR-ed into opcodes reached through the escape byte.
//! 3. **Field Masks:** ModRM, SIB and REX bit layouts.

/// Escape byte introducing the two-byte opcode map.
pub const TWO_BYTE_ESCAPE: u8 = 0x0F;

/// Base OR-ed into the second byte of a two-byte opcode (`0x0F 0x90` dispatches as `0xF90`).
pub const TWO_BYTE_OPCODE_BASE: u16 = 0xF00;

/// Operand-size override prefix.
pub const OPERAND_SIZE_PREFIX: u8 = 0x66;

/// Address-size override prefix.
pub const ADDRESS_SIZE_PREFIX: u8 = 0x67;

/// First byte of the REX prefix range (Long mode only).
pub const REX_FIRST: u8 = 0x40;

/// Last byte of the REX prefix range (Long mode only).
pub const REX_LAST: u8 = 0x4F;

/// REX.W: 64-bit operand size.
pub const REX_W: u8 = 0x08;

/// REX.R: extends ModRM.reg.
pub const REX_R: u8 = 0x04;

/// REX.X: extends SIB.index.
pub const REX_X: u8 = 0x02;

/// REX.B: extends ModRM.rm, SIB.base or the opcode register field.
pub const REX_B: u8 = 0x01;

/// Bit shift of the ModRM `mod` field.
pub const MODRM_MOD_SHIFT: u8 = 6;

/// Bit shift of the ModRM `reg` field.
pub const MODRM_REG_SHIFT: u8 = 3;

/// Mask of a three-bit ModRM/SIB field after shifting.
pub const FIELD_MASK: u8 = 0b111;

/// Mask of the two-bit ModRM `mod` / SIB `scale` field after shifting.
pub const MOD_MASK: u8 = 0b11;

/// ModRM `mod` value selecting a register-direct operand.
pub const MOD_REGISTER: u8 = 0b11;

/// ModRM `rm` value announcing a SIB byte.
pub const RM_SIB: u8 = 0b100;

/// ModRM `rm` value selecting RIP-relative (Long) or disp32-only addressing with `mod == 0`.
pub const RM_DISP32: u8 = 0b101;

/// SIB `index` value meaning "no index register" (unless REX.X is set).
pub const SIB_NO_INDEX: u8 = 0b100;

/// SIB `base` value meaning "disp32, no base register" when `mod == 0`.
pub const SIB_NO_BASE: u8 = 0b101;

/// Size in bytes of a RIP-relative / disp32 displacement.
pub const DISP32_SIZE: usize = 4;
