//! Execution units and functional components.
//!
//! This module contains the units handlers lean on while executing an instruction: the
//! address-generation unit resolving ModRM/SIB/RIP-relative operands, the ALU flag logic, and
//! the bounded stack with its access policies.

/// Address-generation unit (ModRM / SIB / RIP-relative effective addresses).
pub mod agu;

/// Arithmetic Logic Unit flag computation.
pub mod alu;

/// Bounded, top-anchored stack and its access policies.
pub mod stack;
