//! # Stack Policy Tests
//!
//! Offset arithmetic of the bounded stack and how each policy treats bounds violations.

use pretty_assertions::assert_eq;
use rstest::rstest;
use x86sim_core::SimError;
use x86sim_core::config::{StackConfig, StackPolicyKind};
use x86sim_core::core::units::stack::{
    ForgivingStack, NullStack, Stack, StackPolicy, StrictStack,
};

fn stack(policy: StackPolicyKind, top_address: u64, max_size: usize) -> Stack {
    Stack::new(&StackConfig {
        policy,
        top_address,
        max_size,
    })
}

#[test]
fn test_policy_divergence_above_top() {
    let strict = StrictStack::new(0x10, 127);
    let forgiving = ForgivingStack::new(0x10, 127);
    assert_eq!(
        strict.get_offset(0x11, 1),
        Err(SimError::StackUnderflow { address: 0x11 })
    );
    assert_eq!(forgiving.get_offset(0x11, 1), Ok(Vec::new()));
}

#[test]
fn test_write_grows_downward_from_top() {
    let mut s = StrictStack::new(0x10, 127);
    s.set_offset(0x0D, &[0xAA, 0xBB, 0xCC, 0xDD]).unwrap();
    assert_eq!(s.contents(), &[0xAA, 0xBB, 0xCC, 0xDD]);
    assert_eq!(s.get_offset(0x0F, 2), Ok(vec![0xCC, 0xDD]));
}

#[test]
fn test_gap_below_written_region_is_zero_padded() {
    let mut s = StrictStack::new(0x10, 127);
    s.set_offset(0x10, &[0x01]).unwrap();
    s.set_offset(0x0C, &[0x02]).unwrap();
    assert_eq!(s.contents(), &[0x02, 0, 0, 0, 0x01]);
}

#[test]
fn test_read_below_written_region_is_index_error() {
    let mut s = StrictStack::new(0x10, 127);
    s.set_offset(0x0F, &[1, 2]).unwrap();
    assert_eq!(
        s.get_offset(0x0E, 1),
        Err(SimError::StackIndex { address: 0x0E })
    );
}

#[test]
fn test_clear_top_region_shrinks_stack() {
    let mut s = StrictStack::new(0x10, 127);
    s.set_offset(0x0D, &[1, 2, 3, 4]).unwrap();
    s.clear_offset(0x0D, 2).unwrap();
    assert_eq!(s.contents(), &[3, 4]);
}

#[test]
fn test_clear_interior_only_zero_fills() {
    let mut s = StrictStack::new(0x10, 127);
    s.set_offset(0x0D, &[1, 2, 3, 4]).unwrap();
    s.clear_offset(0x0E, 2).unwrap();
    assert_eq!(s.contents(), &[1, 0, 0, 4]);
}

#[test]
fn test_clear_interior_keeps_leading_zero_bytes() {
    let mut s = StrictStack::new(0x10, 127);
    s.set_offset(0x0D, &[0, 0, 3, 4]).unwrap();
    s.clear_offset(0x0F, 1).unwrap();
    assert_eq!(s.contents(), &[0, 0, 0, 4]);
}

#[test]
fn test_clear_top_region_stops_at_cleared_window() {
    let mut s = StrictStack::new(0x10, 127);
    s.set_offset(0x0D, &[1, 2, 0, 4]).unwrap();
    s.clear_offset(0x0D, 2).unwrap();
    assert_eq!(s.contents(), &[0, 4]);
    assert_eq!(s.get_offset(0x0F, 2), Ok(vec![0, 4]));
}

#[test]
fn test_empty_write_below_region_does_not_pad() {
    let mut s = StrictStack::new(0x10, 127);
    s.set_offset(0x10, &[1]).unwrap();
    s.set_offset(0x08, &[]).unwrap();
    assert_eq!(s.contents(), &[1]);
}

#[test]
fn test_growth_beyond_address_space_is_overflow() {
    let mut s = StrictStack::new(u64::MAX, 16);
    assert_eq!(
        s.set_offset(0, &[1]),
        Err(SimError::StackOverflow {
            required: u64::MAX,
            max: 16
        })
    );
    assert!(s.contents().is_empty());
}

#[rstest]
#[case(StackPolicyKind::Strict)]
#[case(StackPolicyKind::Forgiving)]
fn test_overflow_is_fatal(#[case] policy: StackPolicyKind) {
    let mut s = stack(policy, 0x10, 4);
    s.set_offset(0x0D, &[1, 2, 3, 4]).unwrap();
    assert_eq!(
        s.set_offset(0x0C, &[5]),
        Err(SimError::StackOverflow {
            required: 5,
            max: 4
        })
    );
}

#[test]
fn test_forgiving_absorbs_index_errors() {
    let mut s = ForgivingStack::new(0x10, 16);
    assert_eq!(s.get_offset(0x08, 2), Ok(Vec::new()));
    assert_eq!(s.clear_offset(0x08, 2), Ok(()));
    assert_eq!(s.set_offset(0x20, &[1]), Ok(()));
    assert!(s.contents().is_empty());
}

#[test]
fn test_null_stack_ignores_everything() {
    let mut s = NullStack::new();
    s.set_offset(0xFFFF_FFFF, &[1, 2, 3]).unwrap();
    assert_eq!(s.get_offset(0, 3), Ok(vec![0, 0, 0]));
    assert!(s.contents().is_empty());
}

#[rstest]
#[case(StackPolicyKind::Strict)]
#[case(StackPolicyKind::Forgiving)]
#[case(StackPolicyKind::Null)]
fn test_wrapper_reports_kind(#[case] policy: StackPolicyKind) {
    assert_eq!(stack(policy, 0x100, 16).kind(), policy);
}
