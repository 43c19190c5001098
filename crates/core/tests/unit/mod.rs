//! # Unit Components
//!
//! Tests grouped like the source tree: shared types, configuration, the CPU core, the
//! instruction set and the simulator.



/// Register file, modes, flags, address generation, stack and CPU lifecycle.
pub mod core;
