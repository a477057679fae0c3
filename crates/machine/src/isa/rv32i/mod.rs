//! The RV32I base integer instruction set.
//!
//! Constant tables for the three encoding fields the execute stage
//! dispatches on.

/// Minor function codes distinguishing instructions under one opcode.
pub mod funct3;

/// Modifier bits for R-type and shift instructions.
pub mod funct7;

/// Major opcodes.
pub mod opcodes;
