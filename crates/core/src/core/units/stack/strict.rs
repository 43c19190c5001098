//! Strict Stack Policy.
//!
//! Every bounds violation is reported: addresses above the top address fail with
//! `StackUnderflow`, reads and clears below the written region fail with `StackIndex`, and
//! writes that would grow past the maximum size fail with `StackOverflow`.

use super::{StackBuffer, StackPolicy};
use crate::common::SimResult;

/// Strict policy state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrictStack {
    buffer: StackBuffer,
}

impl StrictStack {
    /// Creates an empty strict stack.
    ///
    /// # Arguments
    ///
    /// * `top_address` - Highest addressable stack byte.
    /// * `max_size` - Maximum number of bytes the stack may hold.
    pub const fn new(top_address: u64, max_size: usize) -> Self {
        Self {
            buffer: StackBuffer::new(top_address, max_size),
        }
    }
}

impl StackPolicy for StrictStack {
    fn get_offset(&self, address: u64, len: usize) -> SimResult<Vec<u8>> {
        self.buffer.get_offset(address, len)
    }

    fn set_offset(&mut self, address: u64, data: &[u8]) -> SimResult<()> {
        self.buffer.set_offset(address, data)
    }

    fn clear_offset(&mut self, address: u64, len: usize) -> SimResult<()> {
        self.buffer.clear_offset(address, len)
    }

    fn contents(&self) -> &[u8] {
        self.buffer.contents()
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }
}
