//! # Bus Interconnect Tests
//!
//! Verifies device registration, address routing, unclaimed-access
//! behavior, and the bulk write path used for image loading.

use rvdiff_core::soc::interconnect::Bus;
use rvdiff_core::soc::memory::Memory;
use rvdiff_core::soc::memory::buffer::DramBuffer;

fn make_bus_with_ram(size: usize, base: u64) -> Bus {
    let mut bus = Bus::new();
    bus.add_device(Box::new(Memory::new(DramBuffer::new(size), base)));
    bus
}

// ══════════════════════════════════════════════════════════
// 1. RAM read/write
// ══════════════════════════════════════════════════════════

#[test]
fn ram_write_u8_read_u8() {
    let mut bus = make_bus_with_ram(4096, 0x8000_0000);
    bus.write_u8(0x8000_0000, 0xAB);
    assert_eq!(bus.read_u8(0x8000_0000), 0xAB);
}

#[test]
fn ram_write_u16_read_u16() {
    let mut bus = make_bus_with_ram(4096, 0x8000_0000);
    bus.write_u16(0x8000_0010, 0xBEEF);
    assert_eq!(bus.read_u16(0x8000_0010), 0xBEEF);
}

#[test]
fn ram_write_u32_read_u32() {
    let mut bus = make_bus_with_ram(4096, 0x8000_0000);
    bus.write_u32(0x8000_0020, 0xDEAD_BEEF);
    assert_eq!(bus.read_u32(0x8000_0020), 0xDEAD_BEEF);
}

#[test]
fn words_are_stored_little_endian() {
    let mut bus = make_bus_with_ram(4096, 0x8000_0000);
    bus.write_u32(0x8000_0000, 0xDDCC_BBAA);
    assert_eq!(bus.read_u8(0x8000_0000), 0xAA);
    assert_eq!(bus.read_u8(0x8000_0001), 0xBB);
    assert_eq!(bus.read_u8(0x8000_0002), 0xCC);
    assert_eq!(bus.read_u8(0x8000_0003), 0xDD);
}

#[test]
fn the_last_byte_of_a_region_is_reachable() {
    let mut bus = make_bus_with_ram(4096, 0x8000_0000);
    bus.write_u8(0x8000_0FFF, 0x5A);
    assert_eq!(bus.read_u8(0x8000_0FFF), 0x5A);
}

// ══════════════════════════════════════════════════════════
// 2. Unclaimed addresses
// ══════════════════════════════════════════════════════════

#[test]
fn unclaimed_reads_return_zero() {
    let mut bus = make_bus_with_ram(4096, 0x8000_0000);
    assert_eq!(bus.read_u8(0x1000), 0);
    assert_eq!(bus.read_u16(0x1000), 0);
    assert_eq!(bus.read_u32(0x1000), 0);
}

#[test]
fn unclaimed_writes_are_ignored() {
    let mut bus = make_bus_with_ram(4096, 0x8000_0000);
    bus.write_u32(0x1000, 0xDEAD_BEEF);
    assert_eq!(bus.read_u32(0x1000), 0);
}

#[test]
fn an_empty_bus_claims_nothing() {
    let mut bus = Bus::default();
    assert!(!bus.is_valid_address(0));
    bus.write_u32(0, 0xDEAD_BEEF);
    assert_eq!(bus.read_u32(0), 0);
}

#[test]
fn is_valid_address_covers_the_exact_range() {
    let bus = make_bus_with_ram(4096, 0x8000_0000);
    assert!(!bus.is_valid_address(0x7FFF_FFFF));
    assert!(bus.is_valid_address(0x8000_0000));
    assert!(bus.is_valid_address(0x8000_0FFF));
    assert!(!bus.is_valid_address(0x8000_1000));
}

// ══════════════════════════════════════════════════════════
// 3. Multiple devices
// ══════════════════════════════════════════════════════════

#[test]
fn routing_picks_the_claiming_device() {
    let mut bus = Bus::new();
    // Added out of base order; registration sorts them.
    bus.add_device(Box::new(Memory::new(DramBuffer::new(4096), 0x9000_0000)));
    bus.add_device(Box::new(Memory::new(DramBuffer::new(4096), 0x8000_0000)));
    bus.write_u32(0x8000_0000, 0x1111_1111);
    bus.write_u32(0x9000_0000, 0x2222_2222);
    assert_eq!(bus.read_u32(0x8000_0000), 0x1111_1111);
    assert_eq!(bus.read_u32(0x9000_0000), 0x2222_2222);
}

#[test]
fn alternating_accesses_between_devices_route_correctly() {
    // The last-device hint must not leak accesses to the wrong region.
    let mut bus = Bus::new();
    bus.add_device(Box::new(Memory::new(DramBuffer::new(4096), 0x8000_0000)));
    bus.add_device(Box::new(Memory::new(DramBuffer::new(4096), 0x9000_0000)));
    for i in 0..4u32 {
        bus.write_u32(0x8000_0000 + u64::from(i) * 4, i);
        bus.write_u32(0x9000_0000 + u64::from(i) * 4, i + 100);
    }
    for i in 0..4u32 {
        assert_eq!(bus.read_u32(0x8000_0000 + u64::from(i) * 4), i);
        assert_eq!(bus.read_u32(0x9000_0000 + u64::from(i) * 4), i + 100);
    }
}

// ══════════════════════════════════════════════════════════
// 4. Bulk writes
// ══════════════════════════════════════════════════════════

#[test]
fn write_bytes_at_places_a_contiguous_slice() {
    let mut bus = make_bus_with_ram(4096, 0x8000_0000);
    bus.write_bytes_at(&[0x13, 0x00, 0x00, 0x00, 0xEF, 0xBE, 0xAD, 0xDE], 0x8000_0000);
    assert_eq!(bus.read_u32(0x8000_0000), 0x0000_0013);
    assert_eq!(bus.read_u32(0x8000_0004), 0xDEAD_BEEF);
}

#[test]
fn write_bytes_at_an_unclaimed_address_is_ignored() {
    let mut bus = make_bus_with_ram(4096, 0x8000_0000);
    bus.write_bytes_at(&[1, 2, 3, 4], 0x1000);
    assert_eq!(bus.read_u32(0x1000), 0);
}
