//! `funct7` modifiers.
//!
//! Bits 25-31 split the instruction pairs that share a `funct3` slot, ADD
//! from SUB and SRL from SRA.

/// The base operation of a shared slot (ADD, SRL).
pub const DEFAULT: u32 = 0b0000000;

/// Selects SUB over ADD.
pub const SUB: u32 = 0b0100000;
/// Selects SRA over SRL, same bit pattern as [`SUB`].
pub const SRA: u32 = 0b0100000;
