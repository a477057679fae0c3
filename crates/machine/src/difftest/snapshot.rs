//! Register snapshot layout and transfer direction.
//!
//! This module defines the data exchanged across the C boundary during
//! lockstep checking. It provides:
//! 1. **Snapshot layout:** A C-layout image of the register file and program counter.
//! 2. **Direction encoding:** The raw direction codes a checker passes and their typed form.

use crate::common::constants::GPR_COUNT;

/// Direction of a register state transfer, as encoded on the C boundary.
///
/// The discriminants are part of the wire contract with the checker and
/// must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum TransferDirection {
    /// Copy this machine's state out to the device under test.
    RefToDut = 0,
    /// Copy the device under test's state into this machine.
    DutToRef = 1,
}

impl TransferDirection {
    /// Decodes a raw direction code from the C boundary.
    ///
    /// # Arguments
    ///
    /// * `raw` - The direction code as passed by the checker.
    ///
    /// # Returns
    ///
    /// The typed direction, or `None` for codes outside the contract.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::RefToDut),
            1 => Some(Self::DutToRef),
            _ => None,
        }
    }
}

/// A C-layout image of one hart's architectural register state.
///
/// Field order is part of the wire contract with the checker: thirty-two
/// general purpose registers in index order, then the program counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct RegisterSnapshot {
    /// General purpose registers x0 through x31, in index order.
    pub gpr: [u32; GPR_COUNT],
    /// Program counter.
    pub pc: u32,
}
