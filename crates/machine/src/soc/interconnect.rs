//! The system bus.
//!
//! Routes physical addresses to whichever registered device claims them.
//! Devices stay sorted by base address, with a last-hit hint in front of
//! the scan so streams of accesses to one region stay cheap. Unclaimed
//! reads return zero and unclaimed writes vanish; the hart checks claims
//! first and raises the access fault before an access ever gets here.

use tracing::debug;

use super::traits::Device;

/// Physical address router over the registered devices.
pub struct Bus {
    /// Sorted by base address.
    devices: Vec<Box<dyn Device + Send + Sync>>,
    last_device_idx: usize,
}

impl Bus {
    /// An empty bus; attach devices with [`add_device`](Self::add_device).
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            last_device_idx: 0,
        }
    }

    /// Attaches a device and re-sorts the table.
    pub fn add_device(&mut self, dev: Box<dyn Device + Send + Sync>) {
        let (base, size) = dev.address_range();
        debug!("registered {} at {:#010x} ({} bytes)", dev.name(), base, size);
        self.devices.push(dev);
        self.devices.sort_by_key(|d| d.address_range().0);
        self.last_device_idx = 0;
    }

    /// Bulk write at a physical address.
    ///
    /// When one device claims the whole span this goes through its bulk
    /// path; a span crossing device boundaries degrades to per-byte
    /// routed writes.
    pub fn write_bytes_at(&mut self, data: &[u8], addr: u64) {
        if let Some((dev, offset)) = self.find_device(addr) {
            let (_, size) = dev.address_range();
            if offset + (data.len() as u64) <= size {
                dev.write_bytes(offset, data);
                return;
            }
        }
        for (i, byte) in data.iter().enumerate() {
            self.write_u8(addr + i as u64, *byte);
        }
    }

    /// True when some device's range contains `paddr`.
    pub fn is_valid_address(&self, paddr: u64) -> bool {
        for dev in &self.devices {
            let (start, size) = dev.address_range();
            if paddr >= start && paddr < start + size {
                return true;
            }
        }
        false
    }

    fn find_device(&mut self, paddr: u64) -> Option<(&mut Box<dyn Device + Send + Sync>, u64)> {
        if self.last_device_idx < self.devices.len() {
            let (start, size) = self.devices[self.last_device_idx].address_range();
            if paddr >= start && paddr < start + size {
                return Some((&mut self.devices[self.last_device_idx], paddr - start));
            }
        }

        for (i, dev) in self.devices.iter_mut().enumerate() {
            let (start, size) = dev.address_range();
            if paddr >= start && paddr < start + size {
                self.last_device_idx = i;
                return Some((dev, paddr - start));
            }
        }
        None
    }

    /// Routed byte read; zero when unclaimed.
    pub fn read_u8(&mut self, paddr: u64) -> u8 {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.read_u8(offset)
        } else {
            0
        }
    }
    /// Routed little-endian halfword read; zero when unclaimed.
    pub fn read_u16(&mut self, paddr: u64) -> u16 {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.read_u16(offset)
        } else {
            0
        }
    }
    /// Routed little-endian word read; zero when unclaimed.
    pub fn read_u32(&mut self, paddr: u64) -> u32 {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.read_u32(offset)
        } else {
            0
        }
    }
    /// Routed byte write; dropped when unclaimed.
    pub fn write_u8(&mut self, paddr: u64, val: u8) {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.write_u8(offset, val);
        }
    }
    /// Routed little-endian halfword write; dropped when unclaimed.
    pub fn write_u16(&mut self, paddr: u64, val: u16) {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.write_u16(offset, val);
        }
    }
    /// Routed little-endian word write; dropped when unclaimed.
    pub fn write_u32(&mut self, paddr: u64, val: u32) {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.write_u32(offset, val);
        }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus")
            .field("devices", &self.devices.len())
            .field("last_device_idx", &self.last_device_idx)
            .finish()
    }
}
