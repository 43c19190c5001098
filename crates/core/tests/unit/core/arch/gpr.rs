//! # Register File Tests
//!
//! Round-trips, sub-register aliasing, Long-mode zero-extension and mode validation.

use proptest::prelude::*;
use x86sim_core::SimError;
use x86sim_core::core::arch::gpr::RegisterFile;
use x86sim_core::core::arch::mode::Mode;
use x86sim_core::core::arch::reg::*;

#[test]
fn test_partial_write_preserves_upper_bits() {
    let mut regs = RegisterFile::new(Mode::Long);
    regs.write(RAX, 0x7FFF_FFFF_FFFF_FFFF).unwrap();
    regs.write(AX, 0).unwrap();
    assert_eq!(regs.read(RAX).unwrap(), 0x7FFF_FFFF_FFFF_0000);
}

#[test]
fn test_dword_write_zero_extends_in_long_mode() {
    let mut regs = RegisterFile::new(Mode::Long);
    regs.write(RBX, u64::MAX).unwrap();
    regs.write(EBX, 0x1234).unwrap();
    assert_eq!(regs.read(RBX).unwrap(), 0x1234);
}

#[test]
fn test_high_byte_aliasing() {
    let mut regs = RegisterFile::new(Mode::Long);
    regs.write(RCX, 0x1122_3344).unwrap();
    assert_eq!(regs.read(CH).unwrap(), 0x33);
    assert_eq!(regs.read(CL).unwrap(), 0x44);
    regs.write(CH, 0xAB).unwrap();
    assert_eq!(regs.read(ECX).unwrap(), 0x1122_AB44);
}

#[test]
fn test_write_masks_oversized_value() {
    let mut regs = RegisterFile::new(Mode::Long);
    regs.write(RDX, 0xFFFF_0000_0000_0000).unwrap();
    regs.write(DL, 0x1FF).unwrap();
    assert_eq!(regs.read(RDX).unwrap(), 0xFFFF_0000_0000_00FF);
}

#[test]
fn test_protected_mode_rejects_64_bit_views() {
    let regs = RegisterFile::new(Mode::Protected);
    assert_eq!(
        regs.read(RAX),
        Err(SimError::RegisterWidthExceedsMode {
            register: "RAX",
            width: 64,
            mode: Mode::Protected,
        })
    );
}

#[test]
fn test_real_mode_rejects_extended_registers() {
    let mut regs = RegisterFile::new(Mode::Real);
    assert_eq!(
        regs.write(R8W, 1),
        Err(SimError::RegisterUnavailable {
            register: "R8W",
            mode: Mode::Real,
        })
    );
    assert!(regs.write(EAX, 1).is_err());
    assert!(regs.write(AX, 1).is_ok());
}

#[test]
fn test_protected_mode_dword_write_merges() {
    let mut regs = RegisterFile::new(Mode::Protected);
    regs.write(EAX, 0xDEAD_BEEF).unwrap();
    regs.write(AL, 0).unwrap();
    assert_eq!(regs.read(EAX).unwrap(), 0xDEAD_BE00);
}

proptest! {
    #[test]
    fn prop_round_trip(index in 0usize..68, value in any::<u64>()) {
        let reg = Register::all()[index];
        let value = value & reg.mask();
        let mut regs = RegisterFile::new(Mode::Long);
        regs.write(reg, value).unwrap();
        prop_assert_eq!(regs.read(reg).unwrap(), value);
    }

    #[test]
    fn prop_word_write_leaves_upper_bits(initial in any::<u64>(), value in any::<u16>()) {
        let mut regs = RegisterFile::new(Mode::Long);
        regs.write(RSI, initial).unwrap();
        regs.write(SI, u64::from(value)).unwrap();
        prop_assert_eq!(regs.read(RSI).unwrap(), (initial & !0xFFFF) | u64::from(value));
    }
}
