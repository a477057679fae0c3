//! The general-purpose register file.
//!
//! Thirty-two `u32` registers with the x0 discard rule built into the
//! accessors, so no caller ever special-cases the zero register.

use tracing::debug;

use crate::common::constants::GPR_COUNT;

/// Integer register file, `x0` through `x31`.
///
/// `x0` reads as zero and swallows writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; GPR_COUNT],
}

impl Gpr {
    /// All registers start at zero.
    pub fn new() -> Self {
        Self {
            regs: [0; GPR_COUNT],
        }
    }

    /// Register value at `idx`; always 0 for `x0`.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Stores `val` at `idx`. Writes to `x0` are dropped.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Logs the whole file at debug level, two registers per line.
    pub fn dump(&self) {
        for i in (0..GPR_COUNT).step_by(2) {
            debug!(
                "x{:<2}={:#010x} x{:<2}={:#010x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            );
        }
    }
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new()
    }
}
