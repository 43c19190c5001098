//! CALL.
//!
//! `0xE8` with a rel32 displacement (rel16 under `0x66` outside Long mode). The absolute return
//! address is pushed and the absolute target is reported to an optional observer. Execution
//! continues at the next instruction, since the callee usually lies outside the code buffer
//! being analysed.

use std::fmt;

use tracing::trace;

use super::opcodes::CALL_REL;
use crate::core::Cpu;
use crate::core::arch::mode::Mode;
use crate::core::arch::reg::Width;
use crate::isa::handler::{Dispatch, HandlerResult, InstructionSet, OpcodeMap};

/// Observer receiving the absolute target of each call.
pub type CallObserver = Box<dyn FnMut(u64)>;

/// CALL rel.
#[derive(Default)]
pub struct Call {
    observer: Option<CallObserver>,
}

impl Call {
    /// CALL without an observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// CALL reporting every target to `observer`.
    pub fn with_observer(observer: impl FnMut(u64) + 'static) -> Self {
        Self {
            observer: Some(Box::new(observer)),
        }
    }
}

impl fmt::Debug for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call")
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl InstructionSet for Call {
    fn name(&self) -> &str {
        "call"
    }

    fn into_opcode_map(self: Box<Self>) -> OpcodeMap {
        let mut observer = self.observer;
        OpcodeMap::new().with(CALL_REL, move |cpu| call(cpu, observer.as_mut()))
    }
}

fn call(cpu: &mut Cpu, observer: Option<&mut CallObserver>) -> HandlerResult {
    let ip = cpu.instruction_pointer();
    let size = if cpu.mode() != Mode::Long && cpu.operand_width() == Width::Word {
        2
    } else {
        4
    };
    let displacement = cpu.fetch_signed(ip + 1, size)?;
    let next = ip + 1 + size;
    let return_address = cpu.absolute_address(next);
    let target = return_address.wrapping_add(displacement as u64) & cpu.stack_pointer().mask();

    cpu.push(return_address, cpu.stack_width())?;
    trace!(target, return_address, "call");
    if let Some(observer) = observer {
        observer(target);
    }
    cpu.set_instruction_pointer(next);
    Ok(Dispatch::Accepted)
}
