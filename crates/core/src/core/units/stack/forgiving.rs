//! Forgiving Stack Policy.
//!
//! Bounds violations (`StackUnderflow`, `StackIndex`) are absorbed: reads return an empty
//! result and writes or clears silently do nothing. Growing past the configured maximum size is
//! still a fatal `StackOverflow`.

use tracing::warn;

use super::{StackBuffer, StackPolicy};
use crate::common::{SimError, SimResult};

/// Forgiving policy state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForgivingStack {
    buffer: StackBuffer,
}

impl ForgivingStack {
    /// Creates an empty forgiving stack.
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

/// Whether an error is one the forgiving policy swallows.
const fn absorbed(err: &SimError) -> bool {
    matches!(
        err,
        SimError::StackUnderflow { .. } | SimError::StackIndex { .. }
    )
}

impl StackPolicy for ForgivingStack {
    fn get_offset(&self, address: u64, len: usize) -> SimResult<Vec<u8>> {
        match self.buffer.get_offset(address, len) {
            Err(err) if absorbed(&err) => {
                warn!(%err, "forgiving stack absorbed read");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    fn set_offset(&mut self, address: u64, data: &[u8]) -> SimResult<()> {
        match self.buffer.set_offset(address, data) {
            Err(err) if absorbed(&err) => {
                warn!(%err, "forgiving stack absorbed write");
                Ok(())
            }
            other => other,
        }
    }

    fn clear_offset(&mut self, address: u64, len: usize) -> SimResult<()> {
        match self.buffer.clear_offset(address, len) {
            Err(err) if absorbed(&err) => {
                warn!(%err, "forgiving stack absorbed clear");
                Ok(())
            }
            other => other,
        }
    }

    fn contents(&self) -> &[u8] {
        self.buffer.contents()
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }
}
