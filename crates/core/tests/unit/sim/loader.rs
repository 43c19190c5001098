//! # Code Image Loader Tests
//!
//! ELF objects are produced with `object::write` and read back through `CodeImage`.

use std::io::Write;

use object::write::{Object, StandardSection};
use object::{Architecture, BinaryFormat, Endianness};
use pretty_assertions::assert_eq;
use x86sim_core::SimError;
use x86sim_core::config::Config;
use x86sim_core::core::arch::reg::R9D;
use x86sim_core::sim::CodeImage;

use crate::common::harness::TestContext;

fn elf_with_text(code: &[u8]) -> Vec<u8> {
    let mut obj = Object::new(BinaryFormat::Elf, Architecture::X86_64, Endianness::Little);
    let text = obj.section_id(StandardSection::Text);
    let _ = obj.append_section_data(text, code, 16);
    obj.write().unwrap()
}

#[test]
fn test_from_elf_extracts_text() {
    let elf = elf_with_text(&[0x45, 0x31, 0xC9]);
    let image = CodeImage::from_elf(&elf, ".text").unwrap();
    assert_eq!(image.bytes, vec![0x45, 0x31, 0xC9]);
    assert_eq!(image.address, 0);
}

#[test]
fn test_missing_section() {
    let elf = elf_with_text(&[0x90]);
    assert!(matches!(
        CodeImage::from_elf(&elf, ".init"),
        Err(SimError::Load(msg)) if msg.contains(".init")
    ));
}

#[test]
fn test_garbage_is_load_error() {
    assert!(matches!(
        CodeImage::from_elf(b"not an elf", ".text"),
        Err(SimError::Load(_))
    ));
}

#[test]
fn test_from_file_and_run() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&elf_with_text(&[0x45, 0x31, 0xC9])).unwrap();
    let image = CodeImage::from_file(file.path(), ".text").unwrap();

    let mut ctx = TestContext::with_config(&Config::default());
    ctx.sim.load_image(&image);
    ctx.cpu_mut().write_register(R9D, 1).unwrap();
    assert_eq!(ctx.run(), Ok(1));
    assert_eq!(ctx.cpu().read_register(R9D).unwrap(), 0);
}

#[test]
fn test_load_image_sets_address_base() {
    let image = CodeImage::new(vec![0x06], 0x40_1000);
    let mut ctx = TestContext::new();
    ctx.sim.load_image(&image);
    assert!(!ctx.cpu().is_tainted());
    assert_eq!(
        ctx.run(),
        Err(SimError::InvalidOpcode {
            opcode: 0x06,
            address: 0x40_1000
        })
    );
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        CodeImage::from_file("/nonexistent/x86sim.elf", ".text"),
        Err(SimError::Load(_))
    ));
}
