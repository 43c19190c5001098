//! Reference x86 Instructions.
//!
//! A small instruction set exercising every part of the decoder: prefixes, REX register
//! extension, ModRM register and memory operands, SIB and RIP-relative addressing, the stack
//! and flag updates.
//!
//! # Structure
//!
//! - `opcodes`: Opcode byte constants.
//! - `operand`: ModRM operand decoding and read/write helpers shared by the handlers.
//! - `nop`, `mov`, `stack`, `xor`, `lea`, `call`: The handlers, each exposed as an `InstructionSet`.

/// CALL rel16/rel32.
pub mod call;

/// LEA.
pub mod lea;

/// MOV register, memory and immediate forms.
pub mod mov;

/// NOP and the multi-byte `0x0F 0x1F` NOP.
pub mod nop;

/// Opcode byte constants.
pub mod opcodes;

/// ModRM operand decoding.
pub mod operand;

/// PUSH and POP of general-purpose registers.
pub mod stack;

/// XOR register/memory forms.
pub mod xor;

pub use call::Call;
pub use lea::Lea;
pub use mov::Mov;
pub use nop::Nop;
pub use stack::{Pop, Push};
pub use xor::Xor;
