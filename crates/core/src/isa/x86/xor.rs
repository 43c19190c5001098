//! XOR.
//!
//! Register/memory forms `0x30..=0x33`. The result clears CF and OF and sets SF, ZF and PF
//! from the truncated value.

use super::opcodes::{XOR_R_RM, XOR_R8_RM8, XOR_RM_R, XOR_RM8_R8};
use super::operand::ModRmOperands;
use crate::core::Cpu;
use crate::core::arch::reg::Width;
use crate::core::units::alu;
use crate::isa::handler::{Dispatch, HandlerResult, InstructionSet, OpcodeMap};

/// XOR r/m ↔ r.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xor;

impl InstructionSet for Xor {
    fn name(&self) -> &str {
        "xor"
    }

    fn into_opcode_map(self: Box<Self>) -> OpcodeMap {
        OpcodeMap::new().with_range(XOR_RM8_R8..=XOR_R_RM, xor)
    }
}

fn xor(cpu: &mut Cpu) -> HandlerResult {
    let ip = cpu.instruction_pointer();
    let opcode = u16::from(cpu.fetch_u8(ip)?);
    let width = match opcode {
        XOR_RM8_R8 | XOR_R8_RM8 => Width::Byte,
        _ => cpu.operand_width(),
    };
    let ops = ModRmOperands::decode(cpu, ip + 1, width, 0)?;
    let reg = cpu.read_register(ops.reg)?;
    let rm = ops.read_rm(cpu)?;
    let result = alu::logic(cpu.flags_mut(), reg ^ rm, width);
    match opcode {
        XOR_RM8_R8 | XOR_RM_R => ops.write_rm(cpu, result)?,
        _ => cpu.write_register(ops.reg, result)?,
    }
    cpu.advance_instruction_pointer(1 + ops.len);
    Ok(Dispatch::Accepted)
}
