//! Simulator error definitions.
//!
//! This module defines the single error type returned by every fallible operation. It covers:
//! 1. **Dispatch Failures:** Unhandled opcodes and handler contract violations.
//! 2. **Lifecycle Failures:** Stateful calls made while a reconfiguration awaits `reset()`.
//! 3. **Stack Failures:** Underflow, unwritten-region access and overflow of the bounded stack.
//! 4. **Decode Failures:** Unsupported addressing forms, truncated instructions, register width.
//! 5. **Loader Failures:** Code images that cannot be parsed or located.

use thiserror::Error;

use crate::common::constants::TWO_BYTE_OPCODE_BASE;
use crate::core::arch::mode::Mode;

/// Errors raised while configuring or running the simulator.
///
/// None of these are retried internally. The Forgiving stack policy is the only component that
/// absorbs errors, and only the stack-bounds kinds.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// No registered handler accepted the effective opcode.
    ///
    /// `opcode` is `0xF00 | byte` for opcodes reached through the `0x0F` escape. `address` is the
    /// absolute address of the opcode byte (address base + instruction pointer).
    #[error("invalid opcode {} at {address:#x}", opcode_label(.opcode))]
    InvalidOpcode {
        /// Effective opcode value.
        opcode: u16,
        /// Absolute address of the opcode byte.
        address: u64,
    },

    /// A handler broke the dispatch contract (declined after moving the instruction pointer).
    #[error("handler '{handler}' violated the dispatch contract on opcode {}", opcode_label(.opcode))]
    HandlerContractViolation {
        /// Name the handler was registered under.
        handler: String,
        /// Effective opcode being dispatched.
        opcode: u16,
    },

    /// The CPU was reconfigured and must be `reset()` before further stateful use.
    #[error("environment is tainted by reconfiguration; call reset() first")]
    TaintedEnvironment,

    /// The requested stack address lies above the configured top address.
    #[error("stack underflow at {address:#x}")]
    StackUnderflow {
        /// Requested address.
        address: u64,
    },

    /// The requested stack address is within bounds but below any data actually written.
    #[error("stack address {address:#x} is outside the written region")]
    StackIndex {
        /// Requested address.
        address: u64,
    },

    /// A stack write would grow the buffer past its configured maximum size.
    #[error("stack overflow: {required} bytes required, maximum is {max}")]
    StackOverflow {
        /// Stack length the write would need.
        required: u64,
        /// Configured maximum size.
        max: usize,
    },

    /// The ModRM byte describes a form the resolver does not handle (or is register-direct).
    #[error("invalid addressing mode for ModRM {modrm:#04x}")]
    InvalidAddressingMode {
        /// Raw ModRM byte.
        modrm: u8,
    },

    /// A register is wider than the largest width the current mode can address.
    #[error("register {register} is {width} bits wide, {mode} mode addresses at most {} bits", .mode.max_width())]
    RegisterWidthExceedsMode {
        /// Register display name.
        register: &'static str,
        /// Register width in bits.
        width: u32,
        /// Mode in effect.
        mode: Mode,
    },

    /// The register does not exist in the current mode (R8-R15 outside Long mode).
    #[error("register {register} is not available in {mode} mode")]
    RegisterUnavailable {
        /// Register display name.
        register: &'static str,
        /// Mode in effect.
        mode: Mode,
    },

    /// A handler needed bytes past the end of the code buffer.
    #[error("truncated instruction at {address:#x}: {needed} more byte(s) required")]
    TruncatedInstruction {
        /// Absolute address of the first missing byte.
        address: u64,
        /// Number of bytes requested.
        needed: usize,
    },

    /// The run executed more instructions than the configured step bound.
    #[error("step limit of {limit} instructions exceeded")]
    StepLimitExceeded {
        /// Configured bound.
        limit: u64,
    },

    /// A code image could not be loaded.
    #[error("failed to load code image: {0}")]
    Load(String),
}

/// Result alias used across the crate.
pub type SimResult<T> = Result<T, SimError>;

/// Formats an effective opcode, splitting the two-byte escape form into `0x0f 0x..`.
#[allow(clippy::trivially_copy_pass_by_ref)]
fn opcode_label(opcode: &u16) -> String {
    let opcode = *opcode;
    if opcode & TWO_BYTE_OPCODE_BASE == TWO_BYTE_OPCODE_BASE {
        format!("0x0f {:#04x}", opcode & 0xFF)
    } else {
        format!("{opcode:#04x}")
    }
}

impl From<object::Error> for SimError {
    fn from(err: object::Error) -> Self {
        Self::Load(err.to_string())
    }
}

impl From<std::io::Error> for SimError {
    fn from(err: std::io::Error) -> Self {
        Self::Load(err.to_string())
    }
}
