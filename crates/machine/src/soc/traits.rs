//! The bus-facing device interface.
//!
//! Everything attached to the interconnect implements [`Device`]: it
//! declares the physical range it claims and serves little-endian
//! accesses at offsets relative to that range. Implementors are
//! `Send + Sync` so a machine can live behind the C bindings' shared
//! session handle.

/// A memory device attached to the system bus.
///
/// The bus routes by physical address and hands each accessor an offset
/// already inside the range reported by `address_range`.
pub trait Device: Send + Sync {
    /// Short name used in registration logs, `"DRAM"` for main memory.
    fn name(&self) -> &str;
    /// The claimed region as `(base_address, size_in_bytes)`.
    fn address_range(&self) -> (u64, u64);
    /// Byte read at a device-relative offset.
    fn read_u8(&mut self, offset: u64) -> u8;
    /// Little-endian halfword read.
    fn read_u16(&mut self, offset: u64) -> u16;
    /// Little-endian word read.
    fn read_u32(&mut self, offset: u64) -> u32;
    /// Byte write at a device-relative offset.
    fn write_u8(&mut self, offset: u64, val: u8);
    /// Little-endian halfword write.
    fn write_u16(&mut self, offset: u64, val: u16);
    /// Little-endian word write.
    fn write_u32(&mut self, offset: u64, val: u32);

    /// Bulk write used by the image loader. The default goes byte by
    /// byte; backing stores with contiguous memory override it.
    fn write_bytes(&mut self, offset: u64, data: &[u8]) {
        for (i, byte) in data.iter().enumerate() {
            self.write_u8(offset + i as u64, *byte);
        }
    }
}
