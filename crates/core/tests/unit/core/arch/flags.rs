//! # eFlags Tests

use x86sim_core::core::arch::flags::*;

#[test]
fn test_set_and_get_individual_flags() {
    let mut flags = EFlags::new();
    flags.set(ZF, true);
    flags.set(PF, true);
    assert!(flags.get(ZF));
    assert!(flags.get(PF));
    assert!(!flags.get(CF));
    assert_eq!(flags.bits(), ZF | PF);
    flags.set(ZF, false);
    assert_eq!(flags.bits(), PF);
}

#[test]
fn test_mask_selects_lowest_bit() {
    let mut flags = EFlags::new();
    flags.set(SF | OF, true);
    assert_eq!(flags.bits(), SF);
    assert!(flags.get(SF | OF));
}

#[test]
fn test_clear() {
    let mut flags = EFlags::new();
    flags.set(CF, true);
    flags.set(DF, true);
    flags.clear();
    assert_eq!(flags.bits(), 0);
}
