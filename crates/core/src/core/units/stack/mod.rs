//! Bounded Stack.
//!
//! The stack is a byte buffer anchored at a configured top address and growing downward. Only
//! bytes actually written are held; buffer index 0 is the lowest written address (the most
//! recently pushed byte) and the last index is `top_address`. For a requested address `a` the
//! buffer index is `a - (top_address - len) - 1`.
//!
//! # Policies
//!
//! - `StrictStack`: every bounds violation is fatal.
//! - `ForgivingStack`: bounds violations are absorbed; overflow of the maximum size is fatal.
//! - `NullStack`: configuration is ignored; reads return zeroes, writes do nothing.

/// Forgiving policy: absorbs bounds violations.
pub mod forgiving;

/// Null policy: a stack that stores nothing.
pub mod null;

/// Strict policy: propagates every bounds violation.
pub mod strict;

pub use forgiving::ForgivingStack;
pub use null::NullStack;
pub use strict::StrictStack;

use crate::common::{SimError, SimResult};
use crate::config::{StackConfig, StackPolicyKind};

/// Access interface shared by every stack policy.
///
/// Addresses are absolute stack addresses; the policy translates them into buffer positions.
pub trait StackPolicy {
    /// Reads `len` bytes starting at `address` (lowest address first).
    fn get_offset(&self, address: u64, len: usize) -> SimResult<Vec<u8>>;

    /// Writes `data` starting at `address`, growing the stack downward if needed.
    fn set_offset(&mut self, address: u64, data: &[u8]) -> SimResult<()>;

    /// Zero-fills `len` bytes at `address`. A window starting at the low end also drops its
    /// leading zero bytes, shrinking the stack.
    fn clear_offset(&mut self, address: u64, len: usize) -> SimResult<()>;

    /// Current contents, lowest address first.
    fn contents(&self) -> &[u8];

    /// Discards every byte.
    fn clear(&mut self);
}

/// Raw bounded buffer implementing the strict semantics every policy builds on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StackBuffer {
    top_address: u64,
    max_size: usize,
    bytes: Vec<u8>,
}

impl StackBuffer {
    /// Creates an empty buffer.
    ///
    /// # Arguments
    ///
    /// * `top_address` - Highest addressable stack byte.
    /// * `max_size` - Maximum number of bytes the buffer may hold.
    pub const fn new(top_address: u64, max_size: usize) -> Self {
        Self {
            top_address,
            max_size,
            bytes: Vec::new(),
        }
    }

    /// Buffer index for `address`; negative when the address lies below the written region.
    ///
    /// Fails with `StackUnderflow` when any byte of the access lies above the top address.
    fn offset(&self, address: u64, len: usize) -> SimResult<i128> {
        let last = i128::from(address) + len.saturating_sub(1) as i128;
        if address > self.top_address || last > i128::from(self.top_address) {
            return Err(SimError::StackUnderflow { address });
        }
        Ok(i128::from(address) - (i128::from(self.top_address) - self.bytes.len() as i128) - 1)
    }

    fn written_offset(&self, address: u64, len: usize) -> SimResult<usize> {
        let offset = self.offset(address, len)?;
        usize::try_from(offset).map_err(|_| SimError::StackIndex { address })
    }
}

impl StackPolicy for StackBuffer {
    fn get_offset(&self, address: u64, len: usize) -> SimResult<Vec<u8>> {
        let start = self.written_offset(address, len)?;
        Ok(self.bytes[start..start + len].to_vec())
    }

    fn set_offset(&mut self, address: u64, data: &[u8]) -> SimResult<()> {
        let offset = self.offset(address, data.len())?;
        if data.is_empty() {
            return Ok(());
        }
        let start = if offset < 0 {
            let grow = offset.unsigned_abs();
            let required = usize::try_from(grow)
                .ok()
                .and_then(|grow| self.bytes.len().checked_add(grow))
                .filter(|&required| required <= self.max_size)
                .ok_or_else(|| SimError::StackOverflow {
                    required: u64::try_from(grow.saturating_add(self.bytes.len() as u128))
                        .unwrap_or(u64::MAX),
                    max: self.max_size,
                })?;
            let mut grown = vec![0u8; required - self.bytes.len()];
            grown.extend_from_slice(&self.bytes);
            self.bytes = grown;
            0
        } else {
            offset as usize
        };
        self.bytes[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }

    fn clear_offset(&mut self, address: u64, len: usize) -> SimResult<()> {
        let start = self.written_offset(address, len)?;
        let end = start + len;
        self.bytes[start..end].fill(0);
        // Only a cleared window at the low end shrinks the stack.
        if start == 0 {
            let leading = self.bytes[..end].iter().take_while(|b| **b == 0).count();
            self.bytes.drain(..leading);
        }
        Ok(())
    }

    fn contents(&self) -> &[u8] {
        &self.bytes
    }

    fn clear(&mut self) {
        self.bytes.clear();
    }
}

/// Enum wrapper for static dispatch over the configured stack policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stack {
    /// Strict policy.
    Strict(StrictStack),
    /// Forgiving policy.
    Forgiving(ForgivingStack),
    /// Null policy.
    Null(NullStack),
}

impl Stack {
    /// Builds the stack selected by `config`.
    pub const fn new(config: &StackConfig) -> Self {
        match config.policy {
            StackPolicyKind::Strict => {
                Self::Strict(StrictStack::new(config.top_address, config.max_size))
            }
            StackPolicyKind::Forgiving => {
                Self::Forgiving(ForgivingStack::new(config.top_address, config.max_size))
            }
            StackPolicyKind::Null => Self::Null(NullStack::new()),
        }
    }

    /// Policy this stack was built with.
    pub const fn kind(&self) -> StackPolicyKind {
        match self {
            Self::Strict(_) => StackPolicyKind::Strict,
            Self::Forgiving(_) => StackPolicyKind::Forgiving,
            Self::Null(_) => StackPolicyKind::Null,
        }
    }
}

impl StackPolicy for Stack {
    #[inline(always)]
    fn get_offset(&self, address: u64, len: usize) -> SimResult<Vec<u8>> {
        match self {
            Self::Strict(s) => s.get_offset(address, len),
            Self::Forgiving(s) => s.get_offset(address, len),
            Self::Null(s) => s.get_offset(address, len),
        }
    }

    #[inline(always)]
    fn set_offset(&mut self, address: u64, data: &[u8]) -> SimResult<()> {
        match self {
            Self::Strict(s) => s.set_offset(address, data),
            Self::Forgiving(s) => s.set_offset(address, data),
            Self::Null(s) => s.set_offset(address, data),
        }
    }

    #[inline(always)]
    fn clear_offset(&mut self, address: u64, len: usize) -> SimResult<()> {
        match self {
            Self::Strict(s) => s.clear_offset(address, len),
            Self::Forgiving(s) => s.clear_offset(address, len),
            Self::Null(s) => s.clear_offset(address, len),
        }
    }

    fn contents(&self) -> &[u8] {
        match self {
            Self::Strict(s) => s.contents(),
            Self::Forgiving(s) => s.contents(),
            Self::Null(s) => s.contents(),
        }
    }

    fn clear(&mut self) {
        match self {
            Self::Strict(s) => s.clear(),
            Self::Forgiving(s) => s.clear(),
            Self::Null(s) => s.clear(),
        }
    }
}
