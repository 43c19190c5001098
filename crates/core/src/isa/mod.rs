//! Instruction Set Definitions.
//!
//! Contains the decoding helpers, the opcode-handler contract and the reference x86
//! instructions the default simulator installs.
//!
//! # Structure
//!
//! * `fields`: REX, ModRM and SIB field extraction plus little-endian immediate decoding.
//! * `handler`: The callback contract (`Dispatch`), opcode maps and the `InstructionSet` trait.
//! * `registry`: Priority-ordered handler registrations and opcode dispatch.
//! * `x86`: Reference instruction handlers (NOP, MOV, PUSH, POP, XOR, LEA, CALL).

/// REX / ModRM / SIB field extraction.
pub mod fields;

/// Handler callback contract and opcode maps.
pub mod handler;

/// Priority-ordered handler registry.
pub mod registry;

/// Reference x86 instruction handlers.
pub mod x86;
