//! MOV.
//!
//! Implements the register, memory and immediate forms:
//! 1. **r/m ↔ r:** `0x88..=0x8B`, byte or operand-width.
//! 2. **r ← imm:** `0xB0..=0xB7` (imm8) and `0xB8..=0xBF` (imm16/32, imm64 under REX.W).
//! 3. **r/m ← imm:** `0xC6 /0` (imm8) and `0xC7 /0` (imm16/32, sign-extended to 64 bits under
//!    REX.W). Other `reg` values are declined.

use super::opcodes::{
    MOV_R_IMM, MOV_R_RM, MOV_R8_IMM, MOV_R8_RM8, MOV_RM_IMM, MOV_RM_R, MOV_RM8_IMM, MOV_RM8_R8,
};
use super::operand::ModRmOperands;
use crate::core::Cpu;
use crate::core::arch::reg::{Register, Width};
use crate::isa::handler::{Dispatch, HandlerResult, InstructionSet, OpcodeMap};

/// MOV between registers, memory and immediates.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mov;

impl InstructionSet for Mov {
    fn name(&self) -> &str {
        "mov"
    }

    fn into_opcode_map(self: Box<Self>) -> OpcodeMap {
        OpcodeMap::new()
            .with_range(MOV_RM8_R8..=MOV_R_RM, mov_modrm)
            .with_range(MOV_R8_IMM..MOV_R8_IMM + 8, mov_r8_imm)
            .with_range(MOV_R_IMM..MOV_R_IMM + 8, mov_r_imm)
            .with(MOV_RM8_IMM, mov_rm_imm)
            .with(MOV_RM_IMM, mov_rm_imm)
    }
}

fn mov_modrm(cpu: &mut Cpu) -> HandlerResult {
    let ip = cpu.instruction_pointer();
    let opcode = u16::from(cpu.fetch_u8(ip)?);
    let width = match opcode {
        MOV_RM8_R8 | MOV_R8_RM8 => Width::Byte,
        _ => cpu.operand_width(),
    };
    let ops = ModRmOperands::decode(cpu, ip + 1, width, 0)?;
    match opcode {
        MOV_RM8_R8 | MOV_RM_R => {
            let value = cpu.read_register(ops.reg)?;
            ops.write_rm(cpu, value)?;
        }
        _ => {
            let value = ops.read_rm(cpu)?;
            cpu.write_register(ops.reg, value)?;
        }
    }
    cpu.advance_instruction_pointer(1 + ops.len);
    Ok(Dispatch::Accepted)
}

fn opcode_register(cpu: &Cpu, opcode: u8, width: Width) -> Register {
    cpu.register_by_code(opcode & 0b111, width, cpu.rex().is_some_and(|r| r.b()))
}

fn mov_r8_imm(cpu: &mut Cpu) -> HandlerResult {
    let ip = cpu.instruction_pointer();
    let opcode = cpu.fetch_u8(ip)?;
    let value = u64::from(cpu.fetch_u8(ip + 1)?);
    cpu.write_register(opcode_register(cpu, opcode, Width::Byte), value)?;
    cpu.advance_instruction_pointer(2);
    Ok(Dispatch::Accepted)
}

fn mov_r_imm(cpu: &mut Cpu) -> HandlerResult {
    let ip = cpu.instruction_pointer();
    let opcode = cpu.fetch_u8(ip)?;
    let width = cpu.operand_width();
    let size = width.bytes();
    let value = cpu.fetch_unsigned(ip + 1, size)?;
    cpu.write_register(opcode_register(cpu, opcode, width), value)?;
    cpu.advance_instruction_pointer(1 + size);
    Ok(Dispatch::Accepted)
}

fn mov_rm_imm(cpu: &mut Cpu) -> HandlerResult {
    let ip = cpu.instruction_pointer();
    let opcode = u16::from(cpu.fetch_u8(ip)?);
    let width = if opcode == MOV_RM8_IMM {
        Width::Byte
    } else {
        cpu.operand_width()
    };
    // imm32 is the widest immediate; 64-bit stores sign-extend it.
    let imm_size = width.bytes().min(4);
    let ops = ModRmOperands::decode(cpu, ip + 1, width, imm_size)?;
    if ops.modrm.reg != 0 {
        return Ok(Dispatch::Declined);
    }
    let imm_at = ip + 1 + ops.len;
    let value = cpu.fetch_signed(imm_at, imm_size)? as u64 & width.mask();
    ops.write_rm(cpu, value)?;
    cpu.advance_instruction_pointer(1 + ops.len + imm_size);
    Ok(Dispatch::Accepted)
}
