//! LEA.
//!
//! Loads the effective address of a memory operand, truncated to the operand width, into a
//! register. A register-direct ModRM has no address and is declined.

use super::opcodes::LEA;
use super::operand::{ModRmOperands, Operand};
use crate::core::Cpu;
use crate::isa::handler::{Dispatch, HandlerResult, InstructionSet, OpcodeMap};

/// LEA r, m.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lea;

impl InstructionSet for Lea {
    fn name(&self) -> &str {
        "lea"
    }

    fn into_opcode_map(self: Box<Self>) -> OpcodeMap {
        OpcodeMap::new().with(LEA, lea)
    }
}

fn lea(cpu: &mut Cpu) -> HandlerResult {
    let ip = cpu.instruction_pointer();
    let width = cpu.operand_width();
    let ops = ModRmOperands::decode(cpu, ip + 1, width, 0)?;
    let Operand::Memory(address) = ops.rm else {
        return Ok(Dispatch::Declined);
    };
    cpu.write_register(ops.reg, address & width.mask())?;
    cpu.advance_instruction_pointer(1 + ops.len);
    Ok(Dispatch::Accepted)
}
