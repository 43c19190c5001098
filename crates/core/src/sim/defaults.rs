//! Default Instruction Set.
//!
//! The reference handlers in registration order. Because registration is
//! most-recent-first, anything registered after these takes priority.

use crate::isa::handler::InstructionSet;
use crate::isa::x86::{Call, Lea, Mov, Nop, Pop, Push, Xor};

/// Fresh instances of the reference handlers (CALL without an observer).
pub fn default_instruction_sets() -> Vec<Box<dyn InstructionSet>> {
    vec![
        Box::new(Nop),
        Box::new(Mov),
        Box::new(Push),
        Box::new(Pop),
        Box::new(Xor),
        Box::new(Lea),
        Box::new(Call::new()),
    ]
}
