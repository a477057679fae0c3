//! `funct3` selectors.
//!
//! Bits 12-14 name the specific instruction within a major opcode. The
//! same three bits mean different things per opcode, so the table is
//! grouped by the opcode each block applies under.

// Under OP_LOAD.

/// Sign-extending byte load.
pub const LB: u32 = 0b000;
/// Sign-extending halfword load.
pub const LH: u32 = 0b001;
/// Word load.
pub const LW: u32 = 0b010;
/// Zero-extending byte load.
pub const LBU: u32 = 0b100;
/// Zero-extending halfword load.
pub const LHU: u32 = 0b101;

// Under OP_STORE.

/// Byte store.
pub const SB: u32 = 0b000;
/// Halfword store.
pub const SH: u32 = 0b001;
/// Word store.
pub const SW: u32 = 0b010;

// Under OP_BRANCH.

/// Taken on equality.
pub const BEQ: u32 = 0b000;
/// Taken on inequality.
pub const BNE: u32 = 0b001;
/// Signed less-than.
pub const BLT: u32 = 0b100;
/// Signed greater-or-equal.
pub const BGE: u32 = 0b101;
/// Unsigned less-than.
pub const BLTU: u32 = 0b110;
/// Unsigned greater-or-equal.
pub const BGEU: u32 = 0b111;

// Under OP_IMM and OP_REG. Two of these slots hold an instruction pair;
// the funct7 bits split ADD from SUB and SRL from SRA.

/// Addition, or subtraction under the alternate funct7.
pub const ADD_SUB: u32 = 0b000;
/// Logical left shift.
pub const SLL: u32 = 0b001;
/// Signed set-less-than.
pub const SLT: u32 = 0b010;
/// Unsigned set-less-than.
pub const SLTU: u32 = 0b011;
/// Bitwise exclusive or.
pub const XOR: u32 = 0b100;
/// Right shift, logical or arithmetic by funct7.
pub const SRL_SRA: u32 = 0b101;
/// Bitwise or.
pub const OR: u32 = 0b110;
/// Bitwise and.
pub const AND: u32 = 0b111;

// Under OP_MISC_MEM.

/// Memory ordering fence.
pub const FENCE: u32 = 0b000;
/// Instruction stream fence.
pub const FENCE_I: u32 = 0b001;

// Under OP_SYSTEM.

/// ECALL and EBREAK; the full word distinguishes them.
pub const PRIV: u32 = 0b000;
