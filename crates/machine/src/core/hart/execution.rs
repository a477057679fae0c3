//! Instruction stepping.
//!
//! This module implements the fetch-decode-execute cycle of the hart. It performs the following:
//! 1. **Stepping:** Retires exactly one instruction per `step`, or stops at the first trap.
//! 2. **Dispatch:** Routes decoded instructions to per-opcode handlers.
//! 3. **Control Flow:** Applies jump and branch target checks before any state is committed.

use tracing::trace;

use super::Hart;
use crate::common::Trap;
use crate::common::constants::INSTRUCTION_SIZE;
use crate::core::arch::mode::PrivilegeMode;
use crate::isa::decode::decode;
use crate::isa::instruction::Decoded;
use crate::isa::rv32i::{funct3, funct7, opcodes};

/// Mask applied to shift amounts (RV32 shifts use the low five bits).
const SHIFT_MASK: u32 = 0x1F;

/// Mask clearing the least-significant bit of a JALR target.
const JALR_TARGET_MASK: u32 = !1;

impl Hart {
    /// Executes a single instruction.
    ///
    /// Fetches at the current program counter, decodes, and dispatches. On
    /// success the program counter advances to the next instruction and the
    /// retired-instruction count is incremented. On a trap the hart is left
    /// at the faulting instruction: the program counter does not advance and
    /// the destination register is not written.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the instruction retired, or the trap it raised.
    pub fn step(&mut self) -> Result<(), Trap> {
        let inst = self.fetch_u32(self.pc)?;
        trace!("pc={:#010x} inst={:#010x}", self.pc, inst);
        let decoded = decode(inst);
        let next_pc = self.execute(&decoded)?;
        self.pc = next_pc;
        self.instret += 1;
        Ok(())
    }

    /// Dispatches a decoded instruction to its opcode handler.
    ///
    /// # Arguments
    ///
    /// * `inst` - The decoded instruction.
    ///
    /// # Returns
    ///
    /// The next program counter value, or the trap the instruction raised.
    fn execute(&mut self, inst: &Decoded) -> Result<u32, Trap> {
        match inst.opcode {
            opcodes::OP_LUI => self.exec_lui(inst),
            opcodes::OP_AUIPC => self.exec_auipc(inst),
            opcodes::OP_JAL => self.exec_jal(inst),
            opcodes::OP_JALR => self.exec_jalr(inst),
            opcodes::OP_BRANCH => self.exec_branch(inst),
            opcodes::OP_LOAD => self.exec_load(inst),
            opcodes::OP_STORE => self.exec_store(inst),
            opcodes::OP_IMM => self.exec_op_imm(inst),
            opcodes::OP_REG => self.exec_op_reg(inst),
            opcodes::OP_MISC_MEM => self.exec_misc_mem(inst),
            opcodes::OP_SYSTEM => self.exec_system(inst),
            _ => Err(Trap::IllegalInstruction(inst.raw)),
        }
    }

    /// Returns the address of the next sequential instruction.
    fn next_pc(&self) -> u32 {
        self.pc.wrapping_add(INSTRUCTION_SIZE)
    }

    /// Checks that a control-transfer target is aligned to the instruction size.
    ///
    /// Without the compressed extension, targets must be 4-byte aligned; a
    /// misaligned target raises `InstructionAddressMisaligned` on the jump.
    fn check_jump_target(target: u32) -> Result<u32, Trap> {
        if target % INSTRUCTION_SIZE != 0 {
            return Err(Trap::InstructionAddressMisaligned(target));
        }
        Ok(target)
    }

    /// LUI: loads the upper immediate into rd.
    fn exec_lui(&mut self, inst: &Decoded) -> Result<u32, Trap> {
        self.regs.write(inst.rd, inst.imm as u32);
        Ok(self.next_pc())
    }

    /// AUIPC: adds the upper immediate to the current PC.
    fn exec_auipc(&mut self, inst: &Decoded) -> Result<u32, Trap> {
        self.regs
            .write(inst.rd, self.pc.wrapping_add(inst.imm as u32));
        Ok(self.next_pc())
    }

    /// JAL: jumps to PC plus offset, linking the return address in rd.
    fn exec_jal(&mut self, inst: &Decoded) -> Result<u32, Trap> {
        let target = Self::check_jump_target(self.pc.wrapping_add(inst.imm as u32))?;
        self.regs.write(inst.rd, self.next_pc());
        Ok(target)
    }

    /// JALR: jumps to rs1 plus offset with bit 0 cleared, linking in rd.
    fn exec_jalr(&mut self, inst: &Decoded) -> Result<u32, Trap> {
        if inst.funct3 != 0 {
            return Err(Trap::IllegalInstruction(inst.raw));
        }
        let base = self.regs.read(inst.rs1);
        let target =
            Self::check_jump_target(base.wrapping_add(inst.imm as u32) & JALR_TARGET_MASK)?;
        self.regs.write(inst.rd, self.next_pc());
        Ok(target)
    }

    /// Conditional branches: BEQ, BNE, BLT, BGE, BLTU, BGEU.
    fn exec_branch(&mut self, inst: &Decoded) -> Result<u32, Trap> {
        let lhs = self.regs.read(inst.rs1);
        let rhs = self.regs.read(inst.rs2);
        let taken = match inst.funct3 {
            funct3::BEQ => lhs == rhs,
            funct3::BNE => lhs != rhs,
            funct3::BLT => (lhs as i32) < (rhs as i32),
            funct3::BGE => (lhs as i32) >= (rhs as i32),
            funct3::BLTU => lhs < rhs,
            funct3::BGEU => lhs >= rhs,
            _ => return Err(Trap::IllegalInstruction(inst.raw)),
        };
        if taken {
            Self::check_jump_target(self.pc.wrapping_add(inst.imm as u32))
        } else {
            Ok(self.next_pc())
        }
    }

    /// Loads: LB, LH, LW, LBU, LHU.
    fn exec_load(&mut self, inst: &Decoded) -> Result<u32, Trap> {
        let addr = self.regs.read(inst.rs1).wrapping_add(inst.imm as u32);
        let value = match inst.funct3 {
            funct3::LB => self.load_u8(addr)? as i8 as i32 as u32,
            funct3::LH => self.load_u16(addr)? as i16 as i32 as u32,
            funct3::LW => self.load_u32(addr)?,
            funct3::LBU => u32::from(self.load_u8(addr)?),
            funct3::LHU => u32::from(self.load_u16(addr)?),
            _ => return Err(Trap::IllegalInstruction(inst.raw)),
        };
        self.regs.write(inst.rd, value);
        Ok(self.next_pc())
    }

    /// Stores: SB, SH, SW.
    fn exec_store(&mut self, inst: &Decoded) -> Result<u32, Trap> {
        let addr = self.regs.read(inst.rs1).wrapping_add(inst.imm as u32);
        let value = self.regs.read(inst.rs2);
        match inst.funct3 {
            funct3::SB => self.store_u8(addr, value as u8)?,
            funct3::SH => self.store_u16(addr, value as u16)?,
            funct3::SW => self.store_u32(addr, value)?,
            _ => return Err(Trap::IllegalInstruction(inst.raw)),
        }
        Ok(self.next_pc())
    }

    /// Immediate arithmetic: ADDI, SLTI, SLTIU, XORI, ORI, ANDI, SLLI, SRLI, SRAI.
    fn exec_op_imm(&mut self, inst: &Decoded) -> Result<u32, Trap> {
        let lhs = self.regs.read(inst.rs1);
        let imm = inst.imm as u32;
        let value = match inst.funct3 {
            funct3::ADD_SUB => lhs.wrapping_add(imm),
            funct3::SLT => u32::from((lhs as i32) < inst.imm),
            funct3::SLTU => u32::from(lhs < imm),
            funct3::XOR => lhs ^ imm,
            funct3::OR => lhs | imm,
            funct3::AND => lhs & imm,
            funct3::SLL => {
                if inst.funct7 != funct7::DEFAULT {
                    return Err(Trap::IllegalInstruction(inst.raw));
                }
                lhs << (imm & SHIFT_MASK)
            }
            funct3::SRL_SRA => match inst.funct7 {
                funct7::DEFAULT => lhs >> (imm & SHIFT_MASK),
                funct7::SRA => ((lhs as i32) >> (imm & SHIFT_MASK)) as u32,
                _ => return Err(Trap::IllegalInstruction(inst.raw)),
            },
            _ => return Err(Trap::IllegalInstruction(inst.raw)),
        };
        self.regs.write(inst.rd, value);
        Ok(self.next_pc())
    }

    /// Register arithmetic: ADD, SUB, SLL, SLT, SLTU, XOR, SRL, SRA, OR, AND.
    fn exec_op_reg(&mut self, inst: &Decoded) -> Result<u32, Trap> {
        let lhs = self.regs.read(inst.rs1);
        let rhs = self.regs.read(inst.rs2);
        let value = match (inst.funct3, inst.funct7) {
            (funct3::ADD_SUB, funct7::DEFAULT) => lhs.wrapping_add(rhs),
            (funct3::ADD_SUB, funct7::SUB) => lhs.wrapping_sub(rhs),
            (funct3::SLL, funct7::DEFAULT) => lhs << (rhs & SHIFT_MASK),
            (funct3::SLT, funct7::DEFAULT) => u32::from((lhs as i32) < (rhs as i32)),
            (funct3::SLTU, funct7::DEFAULT) => u32::from(lhs < rhs),
            (funct3::XOR, funct7::DEFAULT) => lhs ^ rhs,
            (funct3::SRL_SRA, funct7::DEFAULT) => lhs >> (rhs & SHIFT_MASK),
            (funct3::SRL_SRA, funct7::SRA) => ((lhs as i32) >> (rhs & SHIFT_MASK)) as u32,
            (funct3::OR, funct7::DEFAULT) => lhs | rhs,
            (funct3::AND, funct7::DEFAULT) => lhs & rhs,
            _ => return Err(Trap::IllegalInstruction(inst.raw)),
        };
        self.regs.write(inst.rd, value);
        Ok(self.next_pc())
    }

    /// FENCE and FENCE.I retire as no-ops on a single hart with no caches.
    fn exec_misc_mem(&mut self, inst: &Decoded) -> Result<u32, Trap> {
        match inst.funct3 {
            funct3::FENCE | funct3::FENCE_I => Ok(self.next_pc()),
            _ => Err(Trap::IllegalInstruction(inst.raw)),
        }
    }

    /// ECALL and EBREAK; both trap.
    fn exec_system(&mut self, inst: &Decoded) -> Result<u32, Trap> {
        if inst.funct3 != funct3::PRIV {
            return Err(Trap::IllegalInstruction(inst.raw));
        }
        match inst.raw {
            opcodes::ECALL => Err(match self.privilege {
                PrivilegeMode::User => Trap::EnvironmentCallFromUMode,
                PrivilegeMode::Supervisor => Trap::EnvironmentCallFromSMode,
                PrivilegeMode::Machine => Trap::EnvironmentCallFromMMode,
            }),
            opcodes::EBREAK => Err(Trap::Breakpoint(self.pc)),
            _ => Err(Trap::IllegalInstruction(inst.raw)),
        }
    }
}
