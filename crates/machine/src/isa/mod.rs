//! Instruction set definitions.
//!
//! Everything the hart needs to understand an RV32I word: the encoding
//! tables, field extraction, and the decoder that turns a raw word into
//! its operands. The machine models the base integer set only.

/// ABI register index names.
pub mod abi;

/// Raw word to `Decoded` operands.
pub mod decode;

/// Field masks and accessors on the encoding.
pub mod instruction;

/// Opcode and function code tables.
pub mod rv32i;
