//! Machine-wide constants.
//!
//! Architectural parameters of an RV32 hart, shared by the register file,
//! the configuration checks, and the loader.

/// General-purpose registers per hart.
pub const GPR_COUNT: usize = 32;

/// Architectural register width in bits.
pub const XLEN: u32 = 32;

/// Bytes in one base instruction word.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Bytes addressable by an RV32 physical address.
pub const PHYS_ADDR_SPACE: u64 = 1 << XLEN;
