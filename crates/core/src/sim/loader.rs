//! Code Image Loader.
//!
//! Extracts the bytes to simulate from a compiled binary. It performs:
//! 1. **Parsing:** Reads ELF files with `object`.
//! 2. **Section lookup:** Returns the named section's contents and virtual address, which
//!    become the simulator's code buffer and address base.

use std::fs;
use std::path::Path;

use object::{Object, ObjectSection};
use tracing::debug;

use crate::common::{SimError, SimResult};

/// Bytes to simulate and the virtual address of their first byte.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeImage {
    /// Raw machine code.
    pub bytes: Vec<u8>,
    /// Virtual address of `bytes[0]`.
    pub address: u64,
}

impl CodeImage {
    /// Wraps raw bytes located at `address`.
    pub const fn new(bytes: Vec<u8>, address: u64) -> Self {
        Self { bytes, address }
    }

    /// Extracts `section` from an in-memory ELF file.
    ///
    /// # Arguments
    ///
    /// * `data` - The complete ELF file.
    /// * `section` - Section name, such as `.text`.
    ///
    /// # Errors
    ///
    /// `Load` if the data is not a parsable object file or has no such section.
    pub fn from_elf(data: &[u8], section: &str) -> SimResult<Self> {
        let file = object::File::parse(data)?;
        let found = file
            .section_by_name(section)
            .ok_or_else(|| SimError::Load(format!("no section named '{section}'")))?;
        let image = Self::new(found.data()?.to_vec(), found.address());
        debug!(
            section,
            address = image.address,
            len = image.bytes.len(),
            "loaded code image"
        );
        Ok(image)
    }

    /// Reads the file at `path` and extracts `section`.
    ///
    /// # Errors
    ///
    /// `Load` if the file cannot be read, parsed, or lacks the section.
    pub fn from_file(path: impl AsRef<Path>, section: &str) -> SimResult<Self> {
        let data = fs::read(path)?;
        Self::from_elf(&data, section)
    }
}
