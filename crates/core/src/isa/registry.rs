//! Handler Registry.
//!
//! Registrations are kept most-recent-first. Dispatching an opcode walks them in that order,
//! so a later registration gets first refusal and can override or wrap an earlier one by
//! declining.

use tracing::{debug, trace};

use super::handler::{Dispatch, InstructionSet, OpcodeMap};
use crate::common::{SimError, SimResult};
use crate::core::Cpu;

#[derive(Debug)]
struct Registration {
    name: String,
    map: OpcodeMap,
}

/// Priority-ordered list of handler registrations.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    entries: Vec<Registration>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `map` under `name` ahead of every existing registration.
    pub fn register(&mut self, name: impl Into<String>, map: OpcodeMap) {
        let name = name.into();
        debug!(handler = %name, opcodes = map.len(), "registering instructions");
        self.entries.insert(0, Registration { name, map });
    }

    /// Registers an [`InstructionSet`] under its own name.
    pub fn install(&mut self, set: Box<dyn InstructionSet>) {
        let name = set.name().to_owned();
        self.register(name, set.into_opcode_map());
    }

    /// Registration names, highest priority first.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Offers `opcode` to each registration mapping it until one accepts.
    ///
    /// # Returns
    ///
    /// `Dispatch::Accepted` if a handler executed the instruction, `Dispatch::Declined` if no
    /// registration accepted it.
    ///
    /// # Errors
    ///
    /// Any error a callback returns, or `HandlerContractViolation` when a callback declines
    /// after moving the instruction pointer.
    pub fn dispatch(&mut self, opcode: u16, cpu: &mut Cpu) -> SimResult<Dispatch> {
        for entry in &mut self.entries {
            let Some(callback) = entry.map.get_mut(opcode) else {
                continue;
            };
            let ip = cpu.instruction_pointer();
            match callback(cpu)? {
                Dispatch::Accepted => {
                    trace!(handler = %entry.name, opcode, "accepted");
                    return Ok(Dispatch::Accepted);
                }
                Dispatch::Declined if cpu.instruction_pointer() != ip => {
                    return Err(SimError::HandlerContractViolation {
                        handler: entry.name.clone(),
                        opcode,
                    });
                }
                Dispatch::Declined => trace!(handler = %entry.name, opcode, "declined"),
            }
        }
        Ok(Dispatch::Declined)
    }
}
