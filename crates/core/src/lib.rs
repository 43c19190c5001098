//! x86 / x86-64 decode-and-dispatch simulator library.
//!
//! This crate executes a subset of x86 machine code against an in-memory virtual CPU so
//! that compiled binaries can be analysed without running them on real hardware:
//! 1. **Core:** Register file with sub-register aliasing, eFlags, instruction pointer and a
//!    policy-driven bounded stack.
//! 2. **Addressing:** ModRM / SIB / RIP-relative effective-address resolution.
//! 3. **ISA:** Prefix/REX field extraction, the opcode-handler contract and registry, and a
//!    small reference instruction set (NOP, MOV, PUSH, POP, XOR, LEA, CALL).
//! 4. **Simulation:** The decode/dispatch loop, the default instruction-set factory and an
//!    ELF code-image loader.
//!
//! ```
//! use x86sim_core::{Config, Simulator};
//! use x86sim_core::core::arch::reg::R9D;
//!
//! let mut sim = Simulator::with_default_instructions(&Config::default(), Vec::new());
//! sim.cpu.write_register(R9D, 0x1234).unwrap();
//! sim.set_code_buffer(vec![0x45, 0x31, 0xC9]); // xor r9d, r9d
//! sim.simulate().unwrap();
//! assert_eq!(sim.cpu.read_register(R9D).unwrap(), 0);
//! ```

/// Common types and constants (errors, prefix bytes, field masks).
pub mod common;
/// Simulator configuration (defaults, mode, stack parameters, step bound).
pub mod config;
/// CPU core (architectural state, execution units).
pub mod core;
/// Instruction set (field extraction, handler contract, reference instructions).
pub mod isa;
/// Simulator, dispatch loop, default factory and code-image loader.
pub mod sim;

/// Crate-wide error type; every fallible operation returns it.
pub use crate::common::SimError;
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Architectural CPU state; owned by a [`Simulator`].
pub use crate::core::Cpu;
/// Top-level simulator (CPU + handler registry).
pub use crate::sim::Simulator;
