//! x86 architecture-specific components.
//!
//! This module contains the architectural elements shared by every handler:
//! 1. **Modes:** Real, Protected and Long simulation modes.
//! 2. **Registers:** Register descriptors and the alias tables resolving encoded ids.
//! 3. **Register File:** Slot storage with width-scoped reads and partial-write merging.
//! 4. **Flags:** The eFlags bitmask and named flag bits.

/// eFlags register and flag bit constants.
pub mod flags;

/// Register file implementation.
pub mod gpr;

/// Simulation mode definitions.
pub mod mode;

/// Register descriptors and alias tables.
pub mod reg;
