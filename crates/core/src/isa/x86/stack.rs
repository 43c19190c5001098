//! PUSH and POP.
//!
//! `0x50..=0x57` pushes and `0x58..=0x5F` pops a general-purpose register; REX.B selects
//! R8-R15. Transfers use the stack width: 64 bits in Long mode, 32 in Protected, 16 in Real
//! mode or under `0x66`.

use super::opcodes::{POP_R, PUSH_R};
use crate::common::SimResult;
use crate::core::Cpu;
use crate::core::arch::reg::Register;
use crate::isa::handler::{Dispatch, HandlerResult, InstructionSet, OpcodeMap};

/// PUSH r.
#[derive(Clone, Copy, Debug, Default)]
pub struct Push;

/// POP r.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pop;

impl InstructionSet for Push {
    fn name(&self) -> &str {
        "push"
    }

    fn into_opcode_map(self: Box<Self>) -> OpcodeMap {
        OpcodeMap::new().with_range(PUSH_R..PUSH_R + 8, push)
    }
}

impl InstructionSet for Pop {
    fn name(&self) -> &str {
        "pop"
    }

    fn into_opcode_map(self: Box<Self>) -> OpcodeMap {
        OpcodeMap::new().with_range(POP_R..POP_R + 8, pop)
    }
}

fn operand_register(cpu: &Cpu) -> SimResult<Register> {
    let opcode = cpu.fetch_u8(cpu.instruction_pointer())?;
    let extend = cpu.rex().is_some_and(|r| r.b());
    Ok(cpu.register_by_code(opcode & 0b111, cpu.stack_width(), extend))
}

fn push(cpu: &mut Cpu) -> HandlerResult {
    let reg = operand_register(cpu)?;
    let value = cpu.read_register(reg)?;
    cpu.push(value, cpu.stack_width())?;
    cpu.advance_instruction_pointer(1);
    Ok(Dispatch::Accepted)
}

fn pop(cpu: &mut Cpu) -> HandlerResult {
    let reg = operand_register(cpu)?;
    let value = cpu.pop(cpu.stack_width())?;
    cpu.write_register(reg, value)?;
    cpu.advance_instruction_pointer(1);
    Ok(Dispatch::Accepted)
}
