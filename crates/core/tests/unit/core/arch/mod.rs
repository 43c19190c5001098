/// eFlags bit access.
pub mod flags;

/// Register file aliasing and zero-extension.
pub mod gpr;


/// Register descriptor tables.
pub mod reg;
