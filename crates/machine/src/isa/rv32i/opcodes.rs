//! Major opcodes.
//!
//! Bits 0-6 of every instruction word, plus the two complete SYSTEM
//! encodings that carry no operand fields at all.

/// LB, LH, LW, LBU, LHU.
pub const OP_LOAD: u32 = 0b0000011;
/// ADDI and the other immediate ALU forms.
pub const OP_IMM: u32 = 0b0010011;
/// AUIPC.
pub const OP_AUIPC: u32 = 0b0010111;
/// SB, SH, SW.
pub const OP_STORE: u32 = 0b0100011;
/// ADD, SUB and the other register ALU forms.
pub const OP_REG: u32 = 0b0110011;
/// LUI.
pub const OP_LUI: u32 = 0b0110111;
/// BEQ through BGEU.
pub const OP_BRANCH: u32 = 0b1100011;
/// JALR.
pub const OP_JALR: u32 = 0b1100111;
/// JAL.
pub const OP_JAL: u32 = 0b1101111;
/// FENCE and FENCE.I.
pub const OP_MISC_MEM: u32 = 0b0001111;
/// ECALL and EBREAK.
pub const OP_SYSTEM: u32 = 0b1110011;

/// The complete ECALL word.
pub const ECALL: u32 = 0x0000_0073;
/// The complete EBREAK word.
pub const EBREAK: u32 = 0x0010_0073;
