//! Checked hart memory access.
//!
//! This module provides the interface between the hart and the memory subsystem.
//! It performs the following:
//! 1. **Validity Checking:** Confirms physical addresses are claimed by a device
//!    before access, raising the access-fault trap matching the access type.
//! 2. **Alignment Checking:** Raises address-misaligned traps for data accesses
//!    unless the machine is configured to allow misaligned accesses.
//! 3. **Bus Access:** Performs the checked loads, stores, and fetches, including
//!    the bulk store path used for image loading.

use super::Hart;
use crate::common::{AccessType, Trap};

impl Hart {
    /// Builds the access-fault trap matching the access type.
    fn access_fault(paddr: u32, access: AccessType) -> Trap {
        match access {
            AccessType::Fetch => Trap::InstructionAccessFault(paddr),
            AccessType::Read => Trap::LoadAccessFault(paddr),
            AccessType::Write => Trap::StoreAccessFault(paddr),
        }
    }

    /// Checks that every byte of an access is claimed by some device.
    ///
    /// Checks the first and last byte; configured regions are contiguous, so an
    /// access with both endpoints claimed by the same region is fully claimed.
    fn check_claimed(&self, paddr: u32, len: u32, access: AccessType) -> Result<(), Trap> {
        let start = u64::from(paddr);
        let end = start + u64::from(len) - 1;
        if !self.bus.is_valid_address(start) || !self.bus.is_valid_address(end) {
            return Err(Self::access_fault(paddr, access));
        }
        Ok(())
    }

    /// Checks natural alignment for a data access.
    ///
    /// Misaligned accesses trap unless the machine allows them.
    fn check_aligned(&self, paddr: u32, align: u32, access: AccessType) -> Result<(), Trap> {
        if self.allow_misaligned || paddr % align == 0 {
            return Ok(());
        }
        Err(match access {
            AccessType::Fetch => Trap::InstructionAddressMisaligned(paddr),
            AccessType::Read => Trap::LoadAddressMisaligned(paddr),
            AccessType::Write => Trap::StoreAddressMisaligned(paddr),
        })
    }

    /// Fetches a 32-bit instruction from the given physical address.
    ///
    /// # Arguments
    ///
    /// * `paddr` - Physical address of the instruction.
    ///
    /// # Returns
    ///
    /// The instruction encoding, or `InstructionAccessFault` if the address is
    /// not claimed by any device.
    pub fn fetch_u32(&mut self, paddr: u32) -> Result<u32, Trap> {
        self.check_claimed(paddr, 4, AccessType::Fetch)?;
        Ok(self.bus.read_u32(u64::from(paddr)))
    }

    /// Loads one byte from memory.
    pub fn load_u8(&mut self, paddr: u32) -> Result<u8, Trap> {
        self.check_claimed(paddr, 1, AccessType::Read)?;
        Ok(self.bus.read_u8(u64::from(paddr)))
    }

    /// Loads two bytes (little-endian) from memory.
    pub fn load_u16(&mut self, paddr: u32) -> Result<u16, Trap> {
        self.check_aligned(paddr, 2, AccessType::Read)?;
        self.check_claimed(paddr, 2, AccessType::Read)?;
        Ok(self.bus.read_u16(u64::from(paddr)))
    }

    /// Loads four bytes (little-endian) from memory.
    pub fn load_u32(&mut self, paddr: u32) -> Result<u32, Trap> {
        self.check_aligned(paddr, 4, AccessType::Read)?;
        self.check_claimed(paddr, 4, AccessType::Read)?;
        Ok(self.bus.read_u32(u64::from(paddr)))
    }

    /// Stores one byte to memory.
    pub fn store_u8(&mut self, paddr: u32, val: u8) -> Result<(), Trap> {
        self.check_claimed(paddr, 1, AccessType::Write)?;
        self.bus.write_u8(u64::from(paddr), val);
        Ok(())
    }

    /// Stores two bytes (little-endian) to memory.
    pub fn store_u16(&mut self, paddr: u32, val: u16) -> Result<(), Trap> {
        self.check_aligned(paddr, 2, AccessType::Write)?;
        self.check_claimed(paddr, 2, AccessType::Write)?;
        self.bus.write_u16(u64::from(paddr), val);
        Ok(())
    }

    /// Stores four bytes (little-endian) to memory.
    pub fn store_u32(&mut self, paddr: u32, val: u32) -> Result<(), Trap> {
        self.check_aligned(paddr, 4, AccessType::Write)?;
        self.check_claimed(paddr, 4, AccessType::Write)?;
        self.bus.write_u32(u64::from(paddr), val);
        Ok(())
    }

    /// Stores a byte slice to memory through the hart's bus.
    ///
    /// Used for image loading so bulk writes observe the same address routing
    /// as ordinary stores. Checks that both endpoints of the destination range
    /// are claimed; on failure the trap reports the base address.
    ///
    /// # Arguments
    ///
    /// * `paddr` - Physical base address of the destination.
    /// * `data` - Bytes to write.
    ///
    /// # Returns
    ///
    /// `Ok(())` on success, or `StoreAccessFault` if the range is not claimed.
    pub fn store_bytes(&mut self, paddr: u32, data: &[u8]) -> Result<(), Trap> {
        if data.is_empty() {
            return Ok(());
        }
        let start = u64::from(paddr);
        let end = start + data.len() as u64 - 1;
        if !self.bus.is_valid_address(start) || !self.bus.is_valid_address(end) {
            return Err(Trap::StoreAccessFault(paddr));
        }
        self.bus.write_bytes_at(data, start);
        Ok(())
    }
}
