//! # End-to-End Scenarios
//!
//! Short programs run through the default instruction set.

use pretty_assertions::assert_eq;
use x86sim_core::config::{Config, StackPolicyKind};
use x86sim_core::core::arch::flags::{CF, OF, PF, SF, ZF};
use x86sim_core::core::arch::mode::Mode;
use x86sim_core::core::arch::reg::*;
use x86sim_core::{SimError, Simulator};

use crate::common::harness::TestContext;

#[test]
fn test_xor_r9d_clears_register_and_sets_flags() {
    let mut ctx = TestContext::new();
    ctx.cpu_mut().write_register(R9D, 0xDEAD_BEEF).unwrap();
    ctx.cpu_mut().set_flag(CF, true).unwrap();
    ctx.cpu_mut().set_flag(SF, true).unwrap();

    assert_eq!(ctx.execute(&[0x45, 0x31, 0xC9]), 1);

    let cpu = ctx.cpu();
    assert_eq!(cpu.read_register(R9D).unwrap(), 0);
    assert!(cpu.get_flag(ZF));
    assert!(cpu.get_flag(PF));
    assert!(!cpu.get_flag(CF));
    assert!(!cpu.get_flag(OF));
    assert!(!cpu.get_flag(SF));
    assert_eq!(cpu.instruction_pointer(), 3);
}

#[test]
fn test_function_prologue_and_epilogue() {
    let mut ctx = TestContext::new();
    ctx.cpu_mut().write_register(RBP, 0x1234).unwrap();
    let code = [
        0x55, // push rbp
        0x48, 0x89, 0xE5, // mov rbp, rsp
        0x48, 0x8D, 0x45, 0xF8, // lea rax, [rbp-8]
        0xC7, 0x00, 0x2A, 0x00, 0x00, 0x00, // mov dword [rax], 42
        0x8B, 0x4D, 0xF8, // mov ecx, [rbp-8]
        0x5D, // pop rbp
    ];
    assert_eq!(ctx.execute(&code), 6);
    let cpu = ctx.cpu();
    assert_eq!(cpu.read_register(RCX).unwrap(), 42);
    assert_eq!(cpu.read_register(RBP).unwrap(), 0x1234);
    assert_eq!(cpu.read_register(RSP).unwrap(), 0x1_0000);
}

#[test]
fn test_protected_mode_program() {
    let mut ctx = TestContext::with_mode(Mode::Protected);
    // mov eax, 5 ; push eax ; pop ebx ; xor eax, eax
    ctx.execute(&[0xB8, 0x05, 0x00, 0x00, 0x00, 0x50, 0x5B, 0x31, 0xC0]);
    let cpu = ctx.cpu();
    assert_eq!(cpu.read_register(EBX).unwrap(), 5);
    assert_eq!(cpu.read_register(EAX).unwrap(), 0);
    assert!(cpu.get_flag(ZF));
}

#[test]
fn test_real_mode_program() {
    let mut ctx = TestContext::with_mode(Mode::Real);
    // mov ax, 0x1234 ; push ax ; pop dx
    ctx.execute(&[0xB8, 0x34, 0x12, 0x50, 0x5A]);
    assert_eq!(ctx.cpu().read_register(DX).unwrap(), 0x1234);
    assert_eq!(ctx.cpu().read_register(SP).unwrap(), 0);
}

#[test]
fn test_forgiving_stack_lets_stray_pop_continue() {
    let mut ctx = TestContext::with_stack_policy(StackPolicyKind::Forgiving);
    ctx.cpu_mut().write_register(RAX, 7).unwrap();
    ctx.execute(&[0x58, 0x90]); // pop rax above the stack top
    assert_eq!(ctx.cpu().read_register(RAX).unwrap(), 0);
}

#[test]
fn test_null_stack_discards_pushes() {
    let mut ctx = TestContext::with_stack_policy(StackPolicyKind::Null);
    ctx.cpu_mut().write_register(RAX, 7).unwrap();
    ctx.execute(&[0x50, 0x5B]); // push rax ; pop rbx
    assert_eq!(ctx.cpu().read_register(RBX).unwrap(), 0);
    assert!(ctx.cpu().get_stack().is_empty());
}

#[test]
fn test_truncated_instruction_halts_run() {
    let mut sim = Simulator::with_default_instructions(&Config::default(), Vec::new());
    sim.set_code_buffer(vec![0x90, 0xB8, 0x01]);
    assert_eq!(
        sim.simulate(),
        Err(SimError::TruncatedInstruction {
            address: 3,
            needed: 4
        })
    );
    assert_eq!(sim.cpu.instruction_pointer(), 1);
}
