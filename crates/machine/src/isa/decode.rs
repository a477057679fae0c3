//! Instruction decoding.
//!
//! Turns a raw 32-bit encoding into a `Decoded` value: opcode, register
//! indices, function codes, and the sign-extended immediate for whichever
//! of the six formats (R, I, S, B, U, J) the opcode selects.

use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::rv32i::opcodes;

/// Total width of an instruction encoding in bits.
const INSTRUCTION_WIDTH: u32 = 32;

// I-type: `imm[11:0] | rs1 | funct3 | rd | opcode`. The immediate sits in
// the top 12 bits, so an arithmetic shift extracts and sign-extends it in
// one step.

/// Shift placing imm[11:0] at bit 0.
const I_IMM_SHIFT: u32 = 20;

// S-type: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`. The
// immediate is split around the register fields and reassembled below.

/// Shift for the low immediate fragment, instruction bits 7-11.
const S_IMM_LOW_SHIFT: u32 = 7;
/// Mask for imm[4:0].
const S_IMM_LOW_MASK: u32 = 0x1F;
/// Shift for the high immediate fragment, instruction bits 25-31.
const S_IMM_HIGH_SHIFT: u32 = 25;
/// Mask for imm[11:5].
const S_IMM_HIGH_MASK: u32 = 0x7F;
/// Position of the high fragment in the reassembled value.
const S_IMM_COMBINED_SHIFT: u32 = 5;
/// Width of the reassembled S-type immediate.
const S_IMM_BITS: u32 = 12;

// B-type: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`.
// Branch offsets are even, so imm[0] does not exist in the encoding; the
// four fragments land at positions 12, 11, 10:5, and 4:1.

/// Shift for imm[11], instruction bit 7.
const B_IMM_11_SHIFT: u32 = 7;
/// Mask for the single imm[11] bit.
const B_IMM_11_MASK: u32 = 1;
/// Shift for imm[4:1], instruction bits 8-11.
const B_IMM_4_1_SHIFT: u32 = 8;
/// Mask for the four imm[4:1] bits.
const B_IMM_4_1_MASK: u32 = 0xF;
/// Shift for imm[10:5], instruction bits 25-30.
const B_IMM_10_5_SHIFT: u32 = 25;
/// Mask for the six imm[10:5] bits.
const B_IMM_10_5_MASK: u32 = 0x3F;
/// Shift for imm[12], instruction bit 31.
const B_IMM_12_SHIFT: u32 = 31;
/// Mask for the sign bit.
const B_IMM_12_MASK: u32 = 1;
/// Width of the reassembled B-type immediate.
const B_IMM_BITS: u32 = 13;
/// Position of imm[12] in the reassembled value.
const B_IMM_12_POS: u32 = 12;
/// Position of imm[11] in the reassembled value.
const B_IMM_11_POS: u32 = 11;
/// Position of imm[10:5] in the reassembled value.
const B_IMM_10_5_POS: u32 = 5;
/// Position of imm[4:1] in the reassembled value.
const B_IMM_4_1_POS: u32 = 1;

// U-type: `imm[31:12] | rd | opcode`. The immediate stays where it is
// encoded; the low 12 bits of the result are zero.

/// Mask keeping imm[31:12] in place.
const U_IMM_MASK: u32 = 0xFFFFF000;

// J-type: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`.
// Like B-type the offset is even, and the fragments are scattered for
// hardware's benefit, not the reader's.

/// Shift for imm[19:12], instruction bits 12-19.
const J_IMM_19_12_SHIFT: u32 = 12;
/// Mask for the eight imm[19:12] bits.
const J_IMM_19_12_MASK: u32 = 0xFF;
/// Shift for imm[11], instruction bit 20.
const J_IMM_11_SHIFT: u32 = 20;
/// Mask for the single imm[11] bit.
const J_IMM_11_MASK: u32 = 1;
/// Shift for imm[10:1], instruction bits 21-30.
const J_IMM_10_1_SHIFT: u32 = 21;
/// Mask for the ten imm[10:1] bits.
const J_IMM_10_1_MASK: u32 = 0x3FF;
/// Shift for imm[20], instruction bit 31.
const J_IMM_20_SHIFT: u32 = 31;
/// Mask for the sign bit.
const J_IMM_20_MASK: u32 = 1;
/// Width of the reassembled J-type immediate.
const J_IMM_BITS: u32 = 21;
/// Position of imm[20] in the reassembled value.
const J_IMM_20_POS: u32 = 20;
/// Position of imm[19:12] in the reassembled value.
const J_IMM_19_12_POS: u32 = 12;
/// Position of imm[11] in the reassembled value.
const J_IMM_11_POS: u32 = 11;
/// Position of imm[10:1] in the reassembled value.
const J_IMM_10_1_POS: u32 = 1;

/// Decodes one instruction word.
///
/// Register and function fields are extracted unconditionally; the
/// immediate decoder is chosen by opcode, and opcodes outside the RV32I
/// base get an immediate of zero (the execute stage rejects them anyway).
pub fn decode(inst: u32) -> Decoded {
    let opcode = inst.opcode();

    let imm = match opcode {
        opcodes::OP_IMM | opcodes::OP_LOAD | opcodes::OP_JALR => decode_i_type_imm(inst),
        opcodes::OP_STORE => decode_s_type_imm(inst),
        opcodes::OP_BRANCH => decode_b_type_imm(inst),
        opcodes::OP_LUI | opcodes::OP_AUIPC => decode_u_type_imm(inst),
        opcodes::OP_JAL => decode_j_type_imm(inst),

        _ => 0,
    };

    Decoded {
        raw: inst,
        opcode,
        rd: InstructionBits::rd(&inst),
        rs1: InstructionBits::rs1(&inst),
        rs2: InstructionBits::rs2(&inst),
        funct3: InstructionBits::funct3(&inst),
        funct7: InstructionBits::funct7(&inst),
        imm,
    }
}

/// Extracts the I-type immediate (loads, JALR, immediate arithmetic).
fn decode_i_type_imm(inst: u32) -> i32 {
    (inst as i32) >> I_IMM_SHIFT
}

/// Reassembles the split S-type immediate (stores).
fn decode_s_type_imm(inst: u32) -> i32 {
    let low = (inst >> S_IMM_LOW_SHIFT) & S_IMM_LOW_MASK;
    let high = (inst >> S_IMM_HIGH_SHIFT) & S_IMM_HIGH_MASK;
    let combined = (high << S_IMM_COMBINED_SHIFT) | low;
    sign_extend(combined, S_IMM_BITS)
}

/// Reassembles the scattered B-type immediate (conditional branches).
fn decode_b_type_imm(inst: u32) -> i32 {
    let bit_11 = (inst >> B_IMM_11_SHIFT) & B_IMM_11_MASK;
    let bits_4_1 = (inst >> B_IMM_4_1_SHIFT) & B_IMM_4_1_MASK;
    let bits_10_5 = (inst >> B_IMM_10_5_SHIFT) & B_IMM_10_5_MASK;
    let bit_12 = (inst >> B_IMM_12_SHIFT) & B_IMM_12_MASK;

    let combined = (bit_12 << B_IMM_12_POS)
        | (bit_11 << B_IMM_11_POS)
        | (bits_10_5 << B_IMM_10_5_POS)
        | (bits_4_1 << B_IMM_4_1_POS);
    sign_extend(combined, B_IMM_BITS)
}

/// Extracts the U-type immediate in place (LUI, AUIPC).
fn decode_u_type_imm(inst: u32) -> i32 {
    (inst & U_IMM_MASK) as i32
}

/// Reassembles the scattered J-type immediate (JAL).
fn decode_j_type_imm(inst: u32) -> i32 {
    let bits_19_12 = (inst >> J_IMM_19_12_SHIFT) & J_IMM_19_12_MASK;
    let bit_11 = (inst >> J_IMM_11_SHIFT) & J_IMM_11_MASK;
    let bits_10_1 = (inst >> J_IMM_10_1_SHIFT) & J_IMM_10_1_MASK;
    let bit_20 = (inst >> J_IMM_20_SHIFT) & J_IMM_20_MASK;

    let combined = (bit_20 << J_IMM_20_POS)
        | (bits_19_12 << J_IMM_19_12_POS)
        | (bit_11 << J_IMM_11_POS)
        | (bits_10_1 << J_IMM_10_1_POS);
    sign_extend(combined, J_IMM_BITS)
}

/// Sign-extends the low `bits` bits of `val` to a full word.
fn sign_extend(val: u32, bits: u32) -> i32 {
    let shift = INSTRUCTION_WIDTH - bits;
    ((val as i32) << shift) >> shift
}
