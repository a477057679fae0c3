//! Instruction word field extraction.
//!
//! RV32I packs register indices and function codes at fixed bit positions
//! shared by every format; this module pulls those fields out of a raw
//! 32-bit word. Immediates are format-specific and live in `decode`.

/// Mask for the opcode field, bits 0-6.
pub const OPCODE_MASK: u32 = 0x7F;
/// Mask for the destination register field, bits 7-11.
pub const RD_MASK: u32 = 0x1F;
/// Mask for the first source register field, bits 15-19.
pub const RS1_MASK: u32 = 0x1F;
/// Mask for the second source register field, bits 20-24.
pub const RS2_MASK: u32 = 0x1F;
/// Mask for the funct3 field, bits 12-14.
pub const FUNCT3_MASK: u32 = 0x7;
/// Mask for the funct7 field, bits 25-31.
pub const FUNCT7_MASK: u32 = 0x7F;

/// Field accessors on a raw instruction encoding.
///
/// Implemented on `u32` so a fetched word can be queried directly. Every
/// accessor is position-based and valid for any word; whether a field is
/// meaningful for a given opcode is the decoder's concern.
pub trait InstructionBits {
    /// The opcode field, bits 0-6. Selects the instruction format.
    fn opcode(&self) -> u32;

    /// The destination register index, bits 7-11.
    fn rd(&self) -> usize;

    /// The first source register index, bits 15-19.
    fn rs1(&self) -> usize;

    /// The second source register index, bits 20-24.
    fn rs2(&self) -> usize;

    /// The funct3 field, bits 12-14. Picks the operation within an opcode.
    fn funct3(&self) -> u32;

    /// The funct7 field, bits 25-31. Separates alternate encodings such as
    /// ADD/SUB and SRL/SRA.
    fn funct7(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 7) & RD_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> 15) & RS1_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> 20) & RS2_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> 25) & FUNCT7_MASK
    }
}

/// A fully extracted instruction.
///
/// Field extraction is unconditional: every field is populated from its
/// fixed position even when the opcode's format does not use it, which
/// keeps the execute stage free of re-extraction. The immediate is the
/// sign-extended value for the word's format, or zero for opcodes without
/// one.
#[derive(Clone, Debug, Default)]
pub struct Decoded {
    /// The word as fetched, kept for trap reporting.
    pub raw: u32,
    /// Major opcode, bits 0-6.
    pub opcode: u32,
    /// Destination register, bits 7-11.
    pub rd: usize,
    /// First source register, bits 15-19.
    pub rs1: usize,
    /// Second source register, bits 20-24.
    pub rs2: usize,
    /// Minor function code, bits 12-14.
    pub funct3: u32,
    /// Additional function code, bits 25-31.
    pub funct7: u32,
    /// Format-specific immediate, already sign-extended.
    pub imm: i32,
}
