//! NOP.
//!
//! `0x90` is a one-byte no-op unless REX.B turns it into `XCHG r8, rAX`, which is declined.
//! `0x0F 0x1F /0` is the multi-byte no-op; its ModRM operand is decoded only to find the
//! instruction length and never accessed.

use super::opcodes::{NOP, NOP_RM};
use super::operand::ModRmOperands;
use crate::core::Cpu;
use crate::isa::handler::{Dispatch, HandlerResult, InstructionSet, OpcodeMap};

/// One-byte and multi-byte NOP.
#[derive(Clone, Copy, Debug, Default)]
pub struct Nop;

impl InstructionSet for Nop {
    fn name(&self) -> &str {
        "nop"
    }

    fn into_opcode_map(self: Box<Self>) -> OpcodeMap {
        OpcodeMap::new().with(NOP, nop).with(NOP_RM, nop_rm)
    }
}

fn nop(cpu: &mut Cpu) -> HandlerResult {
    if cpu.rex().is_some_and(|r| r.b()) {
        return Ok(Dispatch::Declined);
    }
    cpu.advance_instruction_pointer(1);
    Ok(Dispatch::Accepted)
}

fn nop_rm(cpu: &mut Cpu) -> HandlerResult {
    let ip = cpu.instruction_pointer();
    let operands = ModRmOperands::decode(cpu, ip + 1, cpu.operand_width(), 0)?;
    if operands.modrm.reg != 0 {
        return Ok(Dispatch::Declined);
    }
    cpu.advance_instruction_pointer(1 + operands.len);
    Ok(Dispatch::Accepted)
}
