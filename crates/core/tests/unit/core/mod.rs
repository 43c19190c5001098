/// Register descriptors, register file, modes and flags.
pub mod arch;
