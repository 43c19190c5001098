//! ALU result flags.
//!
//! Computes the status flags of logical operations (AND, OR, XOR, TEST): CF and OF are cleared,
//! SF, ZF and PF follow the result truncated to the operand width. AF is left clear.

use crate::core::arch::flags::{AF, CF, EFlags, OF, PF, SF, ZF};
use crate::core::arch::reg::Width;

/// Even parity of the low byte of `value`.
pub const fn parity(value: u64) -> bool {
    (value as u8).count_ones() % 2 == 0
}

/// Most significant bit of `value` at `width`.
pub const fn sign(value: u64, width: Width) -> bool {
    (value >> (width.bits() - 1)) & 1 == 1
}

/// Updates `flags` for the result of a logical operation and returns the truncated result.
pub fn logic(flags: &mut EFlags, result: u64, width: Width) -> u64 {
    let result = result & width.mask();
    flags.set(CF, false);
    flags.set(OF, false);
    flags.set(AF, false);
    flags.set(ZF, result == 0);
    flags.set(SF, sign(result, width));
    flags.set(PF, parity(result));
    result
}
