//! # Error Tests
//!
//! Display formatting of `SimError` and conversions from loader errors.

use x86sim_core::SimError;
use x86sim_core::core::arch::mode::Mode;

#[test]
fn test_invalid_opcode_single_byte_display() {
    let err = SimError::InvalidOpcode {
        opcode: 0x06,
        address: 0x40_1000,
    };
    assert_eq!(err.to_string(), "invalid opcode 0x06 at 0x401000");
}

#[test]
fn test_invalid_opcode_two_byte_display() {
    let err = SimError::InvalidOpcode {
        opcode: 0xF90,
        address: 2,
    };
    assert_eq!(err.to_string(), "invalid opcode 0x0f 0x90 at 0x2");
}

#[test]
fn test_contract_violation_names_handler() {
    let err = SimError::HandlerContractViolation {
        handler: "broken".into(),
        opcode: 0x01,
    };
    let msg = err.to_string();
    assert!(msg.contains("'broken'"));
    assert!(msg.contains("0x01"));
}

#[test]
fn test_width_error_reports_mode_limit() {
    let err = SimError::RegisterWidthExceedsMode {
        register: "RAX",
        width: 64,
        mode: Mode::Protected,
    };
    let msg = err.to_string();
    assert!(msg.contains("RAX"));
    assert!(msg.contains("at most 32 bits"));
}

#[test]
fn test_io_error_becomes_load() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    assert!(matches!(SimError::from(io), SimError::Load(msg) if msg.contains("missing")));
}
