//! Code and Stack Access.
//!
//! This module implements the CPU's two byte-addressed spaces. It provides:
//! 1. **Code Buffer:** The immutable byte sequence of the current run, accessed by windows.
//! 2. **Stack:** Lifecycle-guarded reads, writes and clears through the configured policy.
//! 3. **Memory Operands:** Little-endian loads and stores (the stack is the only memory).
//! 4. **Push/Pop:** Stack-pointer-relative transfers used by PUSH, POP and CALL.

use super::Cpu;
use crate::common::{SimError, SimResult};
use crate::core::arch::mode::Mode;
use crate::core::arch::reg::{self, Register, Width};
use crate::core::units::stack::StackPolicy;
use crate::isa::fields::{signed_le, unsigned_le};

impl Cpu {
    /// Replaces the code buffer and rewinds the instruction pointer to its start.
    pub fn set_code_buffer(&mut self, code: Vec<u8>) {
        self.code = code;
        self.ip = 0;
    }

    /// The whole code buffer.
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    /// `len` bytes of the code buffer starting at `offset`.
    ///
    /// # Errors
    ///
    /// `TruncatedInstruction` if the window runs past the end of the buffer.
    pub fn code_window(&self, offset: usize, len: usize) -> SimResult<&[u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.code.get(offset..end))
            .ok_or_else(|| SimError::TruncatedInstruction {
                address: self.absolute_address(offset.max(self.code.len())),
                needed: len,
            })
    }

    /// Byte of the code buffer at `offset`.
    ///
    /// # Errors
    ///
    /// `TruncatedInstruction` past the end of the buffer.
    pub fn fetch_u8(&self, offset: usize) -> SimResult<u8> {
        Ok(self.code_window(offset, 1)?[0])
    }

    /// Little-endian two's-complement value of `size` bytes at `offset`.
    ///
    /// # Errors
    ///
    /// `TruncatedInstruction` past the end of the buffer.
    pub fn fetch_signed(&self, offset: usize, size: usize) -> SimResult<i64> {
        Ok(signed_le(self.code_window(offset, size)?))
    }

    /// Little-endian unsigned value of `size` bytes at `offset`.
    ///
    /// # Errors
    ///
    /// `TruncatedInstruction` past the end of the buffer.
    pub fn fetch_unsigned(&self, offset: usize, size: usize) -> SimResult<u64> {
        Ok(unsigned_le(self.code_window(offset, size)?))
    }

    /// Reads `len` stack bytes at `address`.
    ///
    /// # Errors
    ///
    /// `TaintedEnvironment`, or the policy's bounds errors.
    pub fn read_stack_at(&self, address: u64, len: usize) -> SimResult<Vec<u8>> {
        self.ensure_ready()?;
        self.stack.get_offset(address, len)
    }

    /// Writes `data` to the stack at `address`.
    ///
    /// # Errors
    ///
    /// `TaintedEnvironment`, or the policy's bounds and overflow errors.
    pub fn write_stack_at(&mut self, address: u64, data: &[u8]) -> SimResult<()> {
        self.ensure_ready()?;
        self.stack.set_offset(address, data)
    }

    /// Zero-fills `len` stack bytes at `address`.
    ///
    /// # Errors
    ///
    /// `TaintedEnvironment`, or the policy's bounds errors.
    pub fn clear_stack_at(&mut self, address: u64, len: usize) -> SimResult<()> {
        self.ensure_ready()?;
        self.stack.clear_offset(address, len)
    }

    /// Current stack contents, lowest address first.
    pub fn get_stack(&self) -> &[u8] {
        self.stack.contents()
    }

    /// Loads a little-endian value of `width` from memory.
    ///
    /// Bytes a forgiving stack could not supply read as zero.
    ///
    /// # Errors
    ///
    /// Same as [`Cpu::read_stack_at`].
    pub fn read_memory(&self, address: u64, width: Width) -> SimResult<u64> {
        let bytes = self.read_stack_at(address, width.bytes())?;
        Ok(unsigned_le(&bytes))
    }

    /// Stores `value` truncated to `width` to memory, little-endian.
    ///
    /// # Errors
    ///
    /// Same as [`Cpu::write_stack_at`].
    pub fn write_memory(&mut self, address: u64, width: Width, value: u64) -> SimResult<()> {
        let bytes = value.to_le_bytes();
        self.write_stack_at(address, &bytes[..width.bytes()])
    }

    /// Stack pointer register of the current mode (SP, ESP or RSP).
    pub const fn stack_pointer(&self) -> Register {
        reg::stack_pointer(match self.mode {
            Mode::Real => Width::Word,
            Mode::Protected => Width::Dword,
            Mode::Long => Width::Qword,
        })
    }

    /// Pushes `value` of `width`: decrements the stack pointer, then stores at the new top.
    ///
    /// The stack pointer is only updated once the store succeeds.
    ///
    /// # Errors
    ///
    /// Register or stack errors.
    pub fn push(&mut self, value: u64, width: Width) -> SimResult<()> {
        let sp_reg = self.stack_pointer();
        let sp = self.read_register(sp_reg)?;
        let new_sp = sp.wrapping_sub(width.bytes() as u64) & sp_reg.mask();
        self.write_memory(new_sp, width, value)?;
        self.write_register(sp_reg, new_sp)
    }

    /// Pops a value of `width`: loads at the stack pointer, clears those bytes, then increments
    /// the stack pointer.
    ///
    /// # Errors
    ///
    /// Register or stack errors.
    pub fn pop(&mut self, width: Width) -> SimResult<u64> {
        let sp_reg = self.stack_pointer();
        let sp = self.read_register(sp_reg)?;
        let value = self.read_memory(sp, width)?;
        self.clear_stack_at(sp, width.bytes())?;
        let new_sp = sp.wrapping_add(width.bytes() as u64) & sp_reg.mask();
        self.write_register(sp_reg, new_sp)?;
        Ok(value)
    }
}
