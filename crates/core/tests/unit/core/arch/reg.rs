//! # Register Descriptor Tests
//!
//! Alias-table resolution (`by_code`), name lookup and derived masks.

use proptest::prelude::*;
use rstest::rstest;
use x86sim_core::core::arch::reg::*;

#[rstest]
#[case(4, Width::Byte, false, false, AH)]
#[case(4, Width::Byte, true, false, SPL)]
#[case(4, Width::Byte, true, true, R12B)]
#[case(5, Width::Byte, false, false, CH)]
#[case(7, Width::Byte, true, false, DIL)]
#[case(0, Width::Byte, true, false, AL)]
#[case(1, Width::Dword, true, true, R9D)]
#[case(1, Width::Dword, false, true, ECX)]
#[case(4, Width::Qword, false, false, RSP)]
#[case(6, Width::Word, false, false, SI)]
#[case(7, Width::Word, true, true, R15W)]
fn test_by_code(
    #[case] id: u8,
    #[case] width: Width,
    #[case] rex_present: bool,
    #[case] rex_extend: bool,
    #[case] expected: Register,
) {
    assert_eq!(Register::by_code(id, width, rex_present, rex_extend), expected);
}

#[test]
fn test_high_byte_registers_share_low_slots() {
    for (high, low) in [(AH, AL), (CH, CL), (DH, DL), (BH, BL)] {
        assert_eq!(high.slot, low.slot);
        assert_eq!(high.shift, 8);
        assert_eq!(low.shift, 0);
    }
}

#[test]
fn test_masks_follow_width() {
    assert_eq!(AL.mask(), 0xFF);
    assert_eq!(AX.mask(), 0xFFFF);
    assert_eq!(EAX.mask(), 0xFFFF_FFFF);
    assert_eq!(RAX.mask(), u64::MAX);
}

#[rstest]
#[case("rax", RAX)]
#[case("R9d", R9D)]
#[case("ah", AH)]
#[case("SPL", SPL)]
fn test_by_name(#[case] name: &str, #[case] expected: Register) {
    assert_eq!(Register::by_name(name), Some(expected));
}

#[test]
fn test_by_name_unknown() {
    assert_eq!(Register::by_name("xmm0"), None);
}

#[test]
fn test_all_names_are_unique() {
    let all = Register::all();
    assert_eq!(all.len(), 68);
    for (i, reg) in all.iter().enumerate() {
        assert!(all[i + 1..].iter().all(|other| other.name != reg.name));
    }
}

proptest! {
    #[test]
    fn prop_extended_lookup_lands_in_upper_bank(id in 0u8..8, w in 0usize..4) {
        let width = [Width::Byte, Width::Word, Width::Dword, Width::Qword][w];
        let reg = Register::by_code(id, width, true, true);
        prop_assert_eq!(reg.slot, usize::from(id) + 8);
        prop_assert_eq!(reg.width, width);
    }

    #[test]
    fn prop_rex_never_selects_high_bytes(id in 0u8..8) {
        let reg = Register::by_code(id, Width::Byte, true, false);
        prop_assert_eq!(reg.shift, 0);
        prop_assert_eq!(reg.slot, usize::from(id));
    }
}
