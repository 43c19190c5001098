//! CPU State Definition and Lifecycle.
//!
//! This module defines the `Cpu` structure, the container for all architectural state a
//! handler may touch. It coordinates the following:
//! 1. **State Management:** Register file, eFlags, instruction pointer and address base.
//! 2. **Decode State:** The current code buffer and the per-instruction prefix/REX state.
//! 3. **Stack:** The policy-selected bounded stack.
//! 4. **Lifecycle:** Reconfiguration marks the CPU as needing a reset before further use.

/// Code-buffer windows and stack access.
pub mod memory;

/// Register, flag and operand-width access.
pub mod registers;

use tracing::debug;

use crate::common::{SimError, SimResult};
use crate::config::{Config, StackConfig, StackPolicyKind};
use crate::core::arch::flags::EFlags;
use crate::core::arch::gpr::RegisterFile;
use crate::core::arch::mode::Mode;
use crate::core::units::stack::Stack;
use crate::isa::fields::Rex;

/// Whether the CPU may be used or awaits a `reset()` after reconfiguration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lifecycle {
    /// Configuration matches the live state; stateful calls are allowed.
    #[default]
    Ready,
    /// Mode or stack parameters changed; only `reset()` is allowed.
    NeedsReset,
}

/// Prefix state accumulated while scanning one instruction.
///
/// Cleared as soon as a handler accepts the instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Prefixes {
    /// `0x0F` escape seen; the opcode is dispatched as `0xF00 | byte`.
    pub two_byte: bool,
    /// `0x66` operand-size override seen.
    pub operand_size: bool,
    /// `0x67` address-size override seen.
    pub address_size: bool,
    /// REX prefix (Long mode only). A later REX replaces an earlier one.
    pub rex: Option<Rex>,
}

/// Architectural state of the simulated CPU.
///
/// Owned exclusively by one [`Simulator`](crate::sim::Simulator); handlers receive it by
/// mutable reference for the duration of one dispatch.
#[derive(Clone, Debug)]
pub struct Cpu {
    mode: Mode,
    regs: RegisterFile,
    flags: EFlags,
    stack_config: StackConfig,
    stack: Stack,
    ip: usize,
    address_base: u64,
    code: Vec<u8>,
    prefixes: Prefixes,
    lifecycle: Lifecycle,
}

impl Cpu {
    /// Creates a CPU in the `Ready` state from `config`, with the stack pointer one past the
    /// stack top.
    pub fn new(config: &Config) -> Self {
        let mut cpu = Self {
            mode: config.mode,
            regs: RegisterFile::new(config.mode),
            flags: EFlags::new(),
            stack_config: config.stack,
            stack: Stack::new(&config.stack),
            ip: 0,
            address_base: config.address_base,
            code: Vec::new(),
            prefixes: Prefixes::default(),
            lifecycle: Lifecycle::Ready,
        };
        cpu.init_stack_pointer();
        cpu
    }

    /// Simulation mode (the pending one if a reconfiguration awaits `reset()`).
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Current lifecycle state.
    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Whether a reconfiguration awaits `reset()`.
    pub fn is_tainted(&self) -> bool {
        self.lifecycle == Lifecycle::NeedsReset
    }

    /// Fails with `TaintedEnvironment` unless the CPU is `Ready`.
    pub fn ensure_ready(&self) -> SimResult<()> {
        match self.lifecycle {
            Lifecycle::Ready => Ok(()),
            Lifecycle::NeedsReset => Err(SimError::TaintedEnvironment),
        }
    }

    /// Zeroes registers, flags, instruction pointer and prefix state, rebuilds the register
    /// file and stack from the current configuration and returns to `Ready`.
    ///
    /// The stack pointer starts one past the stack top (wrapped to the mode's width). The code
    /// buffer and address base are kept.
    pub fn reset(&mut self) {
        self.regs = RegisterFile::new(self.mode);
        self.init_stack_pointer();
        self.flags.clear();
        self.stack = Stack::new(&self.stack_config);
        self.ip = 0;
        self.prefixes = Prefixes::default();
        self.lifecycle = Lifecycle::Ready;
        debug!(mode = %self.mode, top = self.stack_config.top_address, "cpu reset");
    }

    /// Changes the simulation mode; requires `reset()`.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.taint("mode");
    }

    /// Changes the stack top address; requires `reset()`.
    pub fn set_stack_address(&mut self, top_address: u64) {
        self.stack_config.top_address = top_address;
        self.taint("stack address");
    }

    /// Changes the maximum stack size; requires `reset()`.
    pub fn set_stack_size(&mut self, max_size: usize) {
        self.stack_config.max_size = max_size;
        self.taint("stack size");
    }

    /// Changes the stack policy; requires `reset()`.
    pub fn set_stack_policy(&mut self, policy: StackPolicyKind) {
        self.stack_config.policy = policy;
        self.taint("stack policy");
    }

    /// Changes the address base; requires `reset()`.
    pub fn set_address_base(&mut self, address_base: u64) {
        self.address_base = address_base;
        self.taint("address base");
    }

    /// Stack configuration (pending values if a reconfiguration awaits `reset()`).
    pub const fn stack_config(&self) -> &StackConfig {
        &self.stack_config
    }

    /// Address added to the instruction pointer to form absolute addresses.
    pub const fn address_base(&self) -> u64 {
        self.address_base
    }

    /// Absolute address of a code-buffer offset.
    pub const fn absolute_address(&self, offset: usize) -> u64 {
        self.address_base.wrapping_add(offset as u64)
    }

    /// Instruction pointer (offset into the code buffer).
    pub const fn instruction_pointer(&self) -> usize {
        self.ip
    }

    /// Sets the instruction pointer.
    pub fn set_instruction_pointer(&mut self, ip: usize) {
        self.ip = ip;
    }

    /// Advances the instruction pointer by `count` bytes.
    pub fn advance_instruction_pointer(&mut self, count: usize) {
        self.ip = self.ip.saturating_add(count);
    }

    /// Prefix state of the instruction being decoded.
    pub const fn prefixes(&self) -> &Prefixes {
        &self.prefixes
    }

    /// Mutable prefix state; used by the dispatch loop while scanning prefixes.
    pub fn prefixes_mut(&mut self) -> &mut Prefixes {
        &mut self.prefixes
    }

    /// REX prefix of the instruction being decoded, if any.
    pub const fn rex(&self) -> Option<Rex> {
        self.prefixes.rex
    }

    /// Clears the per-instruction prefix state.
    pub fn clear_prefixes(&mut self) {
        self.prefixes = Prefixes::default();
    }

    fn init_stack_pointer(&mut self) {
        let sp = self.stack_pointer();
        self.regs
            .set_slot(sp.slot, self.stack_config.initial_pointer() & sp.mask());
    }

    fn taint(&mut self, what: &str) {
        self.lifecycle = Lifecycle::NeedsReset;
        debug!(what, "cpu reconfigured; reset required");
    }
}
