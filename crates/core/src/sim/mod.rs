//! Simulation driver and program loading.
//!
//! Provides the `Simulator` (CPU and handler registry side by side) with its decode/dispatch
//! loop, the default instruction set, and loading of code images from ELF files.

/// Default instruction set installed by `Simulator::with_default_instructions`.
pub mod defaults;

/// ELF code-image loading.
pub mod loader;

/// Simulator and decode/dispatch loop.
pub mod simulator;

pub use loader::CodeImage;
pub use simulator::Simulator;
