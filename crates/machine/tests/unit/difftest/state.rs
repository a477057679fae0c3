//! # Register State Transfer Tests
//!
//! Verifies the snapshot copy in both directions: the C layout, the
//! hardwired zero register, and overwrite semantics.

use std::mem::{align_of, offset_of, size_of};

use pretty_assertions::assert_eq;
use rvdiff_core::difftest::state::{read_state, write_state};
use rvdiff_core::difftest::{RegisterSnapshot, TransferDirection};

use crate::common::harness::{RAM_BASE, TestContext};

#[test]
fn snapshot_layout_matches_the_wire_contract() {
    // Thirty-two registers then the PC, all 32-bit.
    assert_eq!(size_of::<RegisterSnapshot>(), 33 * 4);
    assert_eq!(align_of::<RegisterSnapshot>(), 4);
    assert_eq!(offset_of!(RegisterSnapshot, gpr), 0);
    assert_eq!(offset_of!(RegisterSnapshot, pc), 32 * 4);
}

#[test]
fn transfer_direction_decodes_wire_codes() {
    assert_eq!(TransferDirection::from_raw(0), Some(TransferDirection::RefToDut));
    assert_eq!(TransferDirection::from_raw(1), Some(TransferDirection::DutToRef));
    assert_eq!(TransferDirection::from_raw(2), None);
    assert_eq!(TransferDirection::from_raw(u32::MAX), None);
}

#[test]
fn read_state_copies_registers_and_pc() {
    let mut ctx = TestContext::new();
    for i in 1..32 {
        ctx.set_reg(i, 0x100 + i as u32);
    }
    let mut snapshot = RegisterSnapshot::default();
    read_state(ctx.machine.boot_hart(), &mut snapshot);
    assert_eq!(snapshot.gpr[0], 0);
    for i in 1..32 {
        assert_eq!(snapshot.gpr[i], 0x100 + i as u32);
    }
    assert_eq!(snapshot.pc, RAM_BASE);
}

#[test]
fn write_state_overwrites_hart_state() {
    let mut ctx = TestContext::new();
    let mut snapshot = RegisterSnapshot::default();
    for i in 1..32 {
        snapshot.gpr[i] = i as u32 * 7;
    }
    snapshot.pc = RAM_BASE + 0x40;
    write_state(ctx.machine.boot_hart_mut(), &snapshot);
    let hart = ctx.machine.boot_hart();
    for i in 1..32 {
        assert_eq!(hart.regs.read(i), i as u32 * 7);
    }
    assert_eq!(hart.pc, RAM_BASE + 0x40);
}

#[test]
fn a_nonzero_x0_cannot_corrupt_the_zero_register() {
    let mut ctx = TestContext::new();
    let mut snapshot = RegisterSnapshot::default();
    snapshot.gpr[0] = 0x1234_5678;
    write_state(ctx.machine.boot_hart_mut(), &snapshot);
    assert_eq!(ctx.machine.boot_hart().regs.read(0), 0);

    let mut out = RegisterSnapshot::default();
    read_state(ctx.machine.boot_hart(), &mut out);
    assert_eq!(out.gpr[0], 0);
}

#[test]
fn a_round_trip_preserves_state() {
    let mut ctx = TestContext::new();
    for i in 1..32 {
        ctx.set_reg(i, 0xA000_0000 | i as u32);
    }
    let mut original = RegisterSnapshot::default();
    read_state(ctx.machine.boot_hart(), &mut original);

    // Scramble the hart, then restore from the snapshot.
    for i in 1..32 {
        ctx.set_reg(i, 0xFFFF_FFFF);
    }
    ctx.machine.boot_hart_mut().pc = 0;
    write_state(ctx.machine.boot_hart_mut(), &original);

    let mut restored = RegisterSnapshot::default();
    read_state(ctx.machine.boot_hart(), &mut restored);
    assert_eq!(restored, original);
}
