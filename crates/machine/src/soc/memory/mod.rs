//! Main system memory.
//!
//! A [`DramBuffer`] holds the raw bytes; [`Memory`] maps it onto the bus
//! at a physical base address and answers the `Device` accessors with
//! little-endian reads and writes.

/// Raw byte storage, mmap-backed where available.
pub mod buffer;

use self::buffer::DramBuffer;
use crate::soc::traits::Device;

/// The RAM device.
#[derive(Debug)]
pub struct Memory {
    buffer: DramBuffer,
    /// Physical address of byte 0 of the buffer.
    base_addr: u64,
}

impl Memory {
    /// Maps `buffer` onto the bus starting at `base_addr`.
    pub fn new(buffer: DramBuffer, base_addr: u64) -> Self {
        Self { buffer, base_addr }
    }

    /// Copies `data` into the buffer starting at `offset`.
    ///
    /// This is the image-loading path. A copy that would run past the end
    /// of the buffer is dropped whole; the loader checks sizes before it
    /// gets here.
    pub fn load(&mut self, data: &[u8], offset: usize) {
        if offset + data.len() <= self.buffer.len() {
            self.buffer.write_slice(offset, data);
        }
    }
}

impl Device for Memory {
    fn name(&self) -> &str {
        "DRAM"
    }

    fn address_range(&self) -> (u64, u64) {
        (self.base_addr, self.buffer.len() as u64)
    }

    fn read_u8(&mut self, offset: u64) -> u8 {
        self.buffer.read_u8(offset as usize)
    }

    fn read_u16(&mut self, offset: u64) -> u16 {
        let i = offset as usize;
        let slice = self.buffer.read_slice(i, 2);
        u16::from_le_bytes([slice[0], slice[1]])
    }

    fn read_u32(&mut self, offset: u64) -> u32 {
        let i = offset as usize;
        let slice = self.buffer.read_slice(i, 4);
        u32::from_le_bytes([slice[0], slice[1], slice[2], slice[3]])
    }

    fn write_u8(&mut self, offset: u64, val: u8) {
        self.buffer.write_u8(offset as usize, val);
    }

    fn write_u16(&mut self, offset: u64, val: u16) {
        self.buffer.write_slice(offset as usize, &val.to_le_bytes());
    }

    fn write_u32(&mut self, offset: u64, val: u32) {
        self.buffer.write_slice(offset as usize, &val.to_le_bytes());
    }

    fn write_bytes(&mut self, offset: u64, data: &[u8]) {
        self.load(data, offset as usize);
    }
}
