//! Simulator: owns the CPU and the handler registry side by side.
//!
//! Handlers receive `&mut Cpu` for the duration of one callback, so neither side holds a
//! reference to the other. The dispatch loop performs:
//! 1. **Prefix scan:** `0x0F` escape, `0x66`/`0x67` overrides and Long-mode REX bytes are
//!    recorded and skipped.
//! 2. **Dispatch:** The opcode (`0xF00 | byte` after an escape) is offered to registrations,
//!    most recent first.
//! 3. **Termination:** The run ends when the instruction pointer leaves the code buffer, an
//!    opcode is not accepted, or the step bound is reached.

use tracing::{debug, trace};

use super::defaults::default_instruction_sets;
use super::loader::CodeImage;
use crate::common::constants::{
    ADDRESS_SIZE_PREFIX, OPERAND_SIZE_PREFIX, REX_FIRST, REX_LAST, TWO_BYTE_ESCAPE,
    TWO_BYTE_OPCODE_BASE,
};
use crate::common::{SimError, SimResult};
use crate::config::Config;
use crate::core::Cpu;
use crate::isa::fields::Rex;
use crate::isa::handler::{Dispatch, InstructionSet, OpcodeMap};
use crate::isa::registry::HandlerRegistry;

/// Top-level simulator: CPU architectural state + handler registry.
#[derive(Debug)]
pub struct Simulator {
    /// CPU architectural state (registers, flags, stack, code buffer).
    pub cpu: Cpu,
    registry: HandlerRegistry,
    max_steps: Option<u64>,
}

impl Simulator {
    /// Creates a simulator with no handlers registered.
    pub fn new(config: &Config) -> Self {
        Self {
            cpu: Cpu::new(config),
            registry: HandlerRegistry::new(),
            max_steps: config.max_steps,
        }
    }

    /// Creates a simulator with the reference instructions installed, followed by `extra`.
    ///
    /// Sets in `extra` are registered after the defaults, so they are offered each opcode
    /// first; a later entry in `extra` beats an earlier one.
    pub fn with_default_instructions(config: &Config, extra: Vec<Box<dyn InstructionSet>>) -> Self {
        let mut sim = Self::new(config);
        for set in default_instruction_sets().into_iter().chain(extra) {
            sim.registry.install(set);
        }
        sim
    }

    /// Registers `map` under `name` with priority over every existing registration.
    pub fn register_instructions(&mut self, name: impl Into<String>, map: OpcodeMap) {
        self.registry.register(name, map);
    }

    /// Registers an [`InstructionSet`] with priority over every existing registration.
    pub fn install(&mut self, set: impl InstructionSet + 'static) {
        self.registry.install(Box::new(set));
    }

    /// The handler registry.
    pub const fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Step bound applied by [`Simulator::simulate`] (`None` is unbounded).
    pub const fn max_steps(&self) -> Option<u64> {
        self.max_steps
    }

    /// Replaces the step bound.
    pub fn set_max_steps(&mut self, max_steps: Option<u64>) {
        self.max_steps = max_steps;
    }

    /// Replaces the code buffer and rewinds the instruction pointer.
    pub fn set_code_buffer(&mut self, code: Vec<u8>) {
        self.cpu.set_code_buffer(code);
    }

    /// Resets the CPU, applying any pending reconfiguration. Registrations are kept.
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Installs `image` as the code buffer at its virtual address and resets the CPU.
    pub fn load_image(&mut self, image: &CodeImage) {
        self.cpu.set_code_buffer(image.bytes.clone());
        self.cpu.set_address_base(image.address);
        self.cpu.reset();
    }

    /// Runs from the current instruction pointer until it leaves the code buffer.
    ///
    /// # Returns
    ///
    /// The number of instructions executed.
    ///
    /// # Errors
    ///
    /// * `TaintedEnvironment` if a reconfiguration awaits `reset()`.
    /// * `InvalidOpcode` if no registration accepts an opcode.
    /// * `StepLimitExceeded` if the step bound is reached with code left to run.
    /// * Any error raised by a handler.
    pub fn simulate(&mut self) -> SimResult<u64> {
        self.cpu.ensure_ready()?;
        self.cpu.clear_prefixes();
        let mode = self.cpu.mode();
        let mut steps = 0u64;
        debug!(
            ip = self.cpu.instruction_pointer(),
            len = self.cpu.code().len(),
            %mode,
            "run started"
        );

        while self.cpu.instruction_pointer() < self.cpu.code().len() {
            let ip = self.cpu.instruction_pointer();
            let byte = self.cpu.fetch_u8(ip)?;
            let prefixes = *self.cpu.prefixes();

            if byte == TWO_BYTE_ESCAPE && mode.allows_extended_prefixes() {
                trace!(ip, "two-byte escape");
                self.cpu.prefixes_mut().two_byte = true;
                self.cpu.advance_instruction_pointer(1);
                continue;
            }
            if (byte == OPERAND_SIZE_PREFIX || byte == ADDRESS_SIZE_PREFIX)
                && mode.allows_extended_prefixes()
                && !prefixes.two_byte
            {
                trace!(ip, prefix = byte, "size override");
                let state = self.cpu.prefixes_mut();
                if byte == OPERAND_SIZE_PREFIX {
                    state.operand_size = true;
                } else {
                    state.address_size = true;
                }
                self.cpu.advance_instruction_pointer(1);
                continue;
            }
            if (REX_FIRST..=REX_LAST).contains(&byte) && mode.allows_rex() && !prefixes.two_byte {
                trace!(ip, rex = byte, "rex prefix");
                self.cpu.prefixes_mut().rex = Some(Rex::from_byte(byte));
                self.cpu.advance_instruction_pointer(1);
                continue;
            }

            let opcode = if prefixes.two_byte {
                TWO_BYTE_OPCODE_BASE | u16::from(byte)
            } else {
                u16::from(byte)
            };
            if let Some(limit) = self.max_steps.filter(|&limit| steps >= limit) {
                return Err(SimError::StepLimitExceeded { limit });
            }
            match self.registry.dispatch(opcode, &mut self.cpu)? {
                Dispatch::Accepted => {
                    self.cpu.clear_prefixes();
                    steps += 1;
                }
                Dispatch::Declined => {
                    return Err(SimError::InvalidOpcode {
                        opcode,
                        address: self.cpu.absolute_address(ip),
                    });
                }
            }
        }

        debug!(steps, ip = self.cpu.instruction_pointer(), "run finished");
        self.cpu.registers().dump();
        Ok(steps)
    }
}
