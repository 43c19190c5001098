//! Handler Contract.
//!
//! An instruction handler is a set of opcode callbacks. When the dispatch loop reaches an
//! opcode byte it calls the matching callback with exclusive access to the CPU; the
//! instruction pointer still points at the opcode byte (after any prefixes and the `0x0F`
//! escape). The callback then either:
//! 1. **Accepts:** consumes the instruction, leaving the instruction pointer at the next one.
//! 2. **Declines:** leaves the CPU untouched so an older registration can try the opcode.
//! 3. **Fails:** returns a `SimError`, which halts the run.

use std::collections::BTreeMap;
use std::fmt;

use crate::common::SimResult;
use crate::core::Cpu;

/// Non-fatal outcome of a handler callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The instruction was executed.
    Accepted,
    /// The opcode is offered to the next-older registration.
    Declined,
}

/// Result of one handler callback.
pub type HandlerResult = SimResult<Dispatch>;

/// Boxed opcode callback.
pub type Callback = Box<dyn FnMut(&mut Cpu) -> HandlerResult>;

/// Effective opcode to callback mapping of one handler.
///
/// Two-byte opcodes are keyed as `0xF00 | second_byte`.
#[derive(Default)]
pub struct OpcodeMap {
    callbacks: BTreeMap<u16, Callback>,
}

impl OpcodeMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `opcode` to `callback`, replacing any previous mapping.
    pub fn insert<F>(&mut self, opcode: u16, callback: F)
    where
        F: FnMut(&mut Cpu) -> HandlerResult + 'static,
    {
        let _ = self.callbacks.insert(opcode, Box::new(callback));
    }

    /// Builder form of [`OpcodeMap::insert`].
    #[must_use]
    pub fn with<F>(mut self, opcode: u16, callback: F) -> Self
    where
        F: FnMut(&mut Cpu) -> HandlerResult + 'static,
    {
        self.insert(opcode, callback);
        self
    }

    /// Maps every opcode in `opcodes` to the same function.
    #[must_use]
    pub fn with_range<I>(mut self, opcodes: I, callback: fn(&mut Cpu) -> HandlerResult) -> Self
    where
        I: IntoIterator<Item = u16>,
    {
        for opcode in opcodes {
            self.insert(opcode, callback);
        }
        self
    }

    /// Whether `opcode` is mapped.
    pub fn contains(&self, opcode: u16) -> bool {
        self.callbacks.contains_key(&opcode)
    }

    /// Callback for `opcode`, if mapped.
    pub fn get_mut(&mut self, opcode: u16) -> Option<&mut Callback> {
        self.callbacks.get_mut(&opcode)
    }

    /// Mapped opcodes in ascending order.
    pub fn opcodes(&self) -> impl Iterator<Item = u16> + '_ {
        self.callbacks.keys().copied()
    }

    /// Number of mapped opcodes.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Whether nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl fmt::Debug for OpcodeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.callbacks.keys().map(|op| format!("{op:#05x}")))
            .finish()
    }
}

/// A named group of opcode callbacks that can be registered with a simulator.
pub trait InstructionSet {
    /// Registration name, reported in contract violations and traces.
    fn name(&self) -> &str;

    /// Consumes the set, producing its opcode map.
    fn into_opcode_map(self: Box<Self>) -> OpcodeMap;
}
