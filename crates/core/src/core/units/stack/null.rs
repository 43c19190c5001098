//! Null Stack Policy.
//!
//! A stack that stores nothing. Reads return zero-filled data of the requested length,
//! writes and clears are no-ops, and the contents are always empty.

use super::StackPolicy;
use crate::common::SimResult;

/// Null policy (stateless).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullStack;

impl NullStack {
    /// Creates a null stack.
    pub const fn new() -> Self {
        Self
    }
}

impl StackPolicy for NullStack {
    fn get_offset(&self, _address: u64, len: usize) -> SimResult<Vec<u8>> {
        Ok(vec![0; len])
    }

    fn set_offset(&mut self, _address: u64, _data: &[u8]) -> SimResult<()> {
        Ok(())
    }

    fn clear_offset(&mut self, _address: u64, _len: usize) -> SimResult<()> {
        Ok(())
    }

    fn contents(&self) -> &[u8] {
        &[]
    }

    fn clear(&mut self) {}
}
