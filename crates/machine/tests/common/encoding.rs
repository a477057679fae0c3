//! RISC-V Instruction Encoders.
//!
//! Builds raw 32-bit encodings for each base instruction format. These are
//! the inverse of the crate's decoder and are used both to feed programs to
//! the hart and to verify immediate reconstruction.

/// Encodes an R-type instruction (register-register arithmetic).
pub fn r_type(opcode: u32, rd: u32, funct3: u32, rs1: u32, rs2: u32, funct7: u32) -> u32 {
    opcode
        | ((rd & 0x1F) << 7)
        | ((funct3 & 0x7) << 12)
        | ((rs1 & 0x1F) << 15)
        | ((rs2 & 0x1F) << 20)
        | ((funct7 & 0x7F) << 25)
}

/// Encodes an I-type instruction (immediate arithmetic, loads, JALR).
///
/// The low 12 bits of `imm` are placed in the instruction; the decoder
/// sign-extends them back.
pub fn i_type(opcode: u32, rd: u32, funct3: u32, rs1: u32, imm: i32) -> u32 {
    opcode
        | ((rd & 0x1F) << 7)
        | ((funct3 & 0x7) << 12)
        | ((rs1 & 0x1F) << 15)
        | (((imm as u32) & 0xFFF) << 20)
}

/// Encodes an S-type instruction (stores).
pub fn s_type(opcode: u32, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    opcode
        | ((imm & 0x1F) << 7)
        | ((funct3 & 0x7) << 12)
        | ((rs1 & 0x1F) << 15)
        | ((rs2 & 0x1F) << 20)
        | (((imm >> 5) & 0x7F) << 25)
}

/// Encodes a B-type instruction (conditional branches).
///
/// `imm` is the byte offset from the branch; it must be even.
pub fn b_type(opcode: u32, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    opcode
        | (((imm >> 11) & 0x1) << 7)
        | (((imm >> 1) & 0xF) << 8)
        | ((funct3 & 0x7) << 12)
        | ((rs1 & 0x1F) << 15)
        | ((rs2 & 0x1F) << 20)
        | (((imm >> 5) & 0x3F) << 25)
        | (((imm >> 12) & 0x1) << 31)
}

/// Encodes a U-type instruction (LUI, AUIPC).
///
/// `imm` carries the upper 20 bits in place; the low 12 bits are ignored.
pub fn u_type(opcode: u32, rd: u32, imm: u32) -> u32 {
    opcode | ((rd & 0x1F) << 7) | (imm & 0xFFFF_F000)
}

/// Encodes a J-type instruction (JAL).
///
/// `imm` is the byte offset from the jump; it must be even.
pub fn j_type(opcode: u32, rd: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    opcode
        | ((rd & 0x1F) << 7)
        | (((imm >> 12) & 0xFF) << 12)
        | (((imm >> 11) & 0x1) << 20)
        | (((imm >> 1) & 0x3FF) << 21)
        | (((imm >> 20) & 0x1) << 31)
}
