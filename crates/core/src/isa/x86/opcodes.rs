//! x86 Opcode Bytes.
//!
//! Effective opcodes as seen by the dispatch loop. Two-byte opcodes carry the `0xF00` escape
//! marker.

/// XOR r/m8, r8.
pub const XOR_RM8_R8: u16 = 0x30;

/// XOR r/m, r.
pub const XOR_RM_R: u16 = 0x31;

/// XOR r8, r/m8.
pub const XOR_R8_RM8: u16 = 0x32;

/// XOR r, r/m.
pub const XOR_R_RM: u16 = 0x33;

/// PUSH r (low three bits select the register).
pub const PUSH_R: u16 = 0x50;

/// POP r (low three bits select the register).
pub const POP_R: u16 = 0x58;

/// MOV r/m8, r8.
pub const MOV_RM8_R8: u16 = 0x88;

/// MOV r/m, r.
pub const MOV_RM_R: u16 = 0x89;

/// MOV r8, r/m8.
pub const MOV_R8_RM8: u16 = 0x8A;

/// MOV r, r/m.
pub const MOV_R_RM: u16 = 0x8B;

/// LEA r, m.
pub const LEA: u16 = 0x8D;

/// NOP.
pub const NOP: u16 = 0x90;

/// MOV r8, imm8 (low three bits select the register).
pub const MOV_R8_IMM: u16 = 0xB0;

/// MOV r, imm (low three bits select the register).
pub const MOV_R_IMM: u16 = 0xB8;

/// MOV r/m8, imm8 (`/0`).
pub const MOV_RM8_IMM: u16 = 0xC6;

/// MOV r/m, imm (`/0`).
pub const MOV_RM_IMM: u16 = 0xC7;

/// CALL rel16/rel32.
pub const CALL_REL: u16 = 0xE8;

/// Multi-byte NOP r/m (`0x0F 0x1F /0`).
pub const NOP_RM: u16 = 0xF1F;
