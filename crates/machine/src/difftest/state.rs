//! Register state transfer between a hart and a snapshot.
//!
//! This module copies architectural state across the snapshot boundary. It
//! performs:
//! 1. **State export:** Reads hart registers into a snapshot for the checker to compare.
//! 2. **State import:** Writes snapshot contents into the hart to adopt checker state.
//!
//! Both directions copy x0 through x31 in ascending index order with the
//! program counter last, matching the snapshot's field order.

use crate::common::constants::GPR_COUNT;
use crate::core::Hart;
use crate::difftest::snapshot::RegisterSnapshot;

/// Copies the hart's register state into a snapshot.
///
/// # Arguments
///
/// * `hart` - The hart to read.
/// * `snapshot` - The snapshot to fill.
pub fn read_state(hart: &Hart, snapshot: &mut RegisterSnapshot) {
    for idx in 0..GPR_COUNT {
        snapshot.gpr[idx] = hart.regs.read(idx);
    }
    snapshot.pc = hart.pc;
}

/// Copies a snapshot's register state into the hart.
///
/// Writes to x0 are discarded by the register file, so a snapshot carrying a
/// nonzero x0 cannot corrupt the zero register.
///
/// # Arguments
///
/// * `hart` - The hart to overwrite.
/// * `snapshot` - The snapshot to copy from.
pub fn write_state(hart: &mut Hart, snapshot: &RegisterSnapshot) {
    for idx in 0..GPR_COUNT {
        hart.regs.write(idx, snapshot.gpr[idx]);
    }
    hart.pc = snapshot.pc;
}
