//! Machine Test Harness.
//!
//! Builds machines for tests and provides helpers to place programs, seed
//! registers, and step with trap extraction.

use rvdiff_core::common::{MachineError, Trap};
use rvdiff_core::config::MachineConfig;
use rvdiff_core::sim::Machine;
use tracing_subscriber::EnvFilter;

/// Base address of the default main memory region.
pub const RAM_BASE: u32 = 0x8000_0000;

/// Installs a tracing subscriber for the test process; later calls are no-ops.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// A machine under test plus the helpers most tests need around it.
pub struct TestContext {
    /// The machine under test.
    pub machine: Machine,
}

impl TestContext {
    /// Creates a context around a default RV32I machine.
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    /// Creates a context around a machine built from the given configuration.
    pub fn with_config(config: MachineConfig) -> Self {
        init_test_logging();
        let machine = Machine::new(config).unwrap();
        Self { machine }
    }

    /// Writes a program into memory word by word and points the PC at it.
    pub fn load_program(&mut self, addr: u32, program: &[u32]) {
        let hart = self.machine.boot_hart_mut();
        for (i, word) in program.iter().enumerate() {
            hart.bus.write_u32(u64::from(addr) + i as u64 * 4, *word);
        }
        hart.pc = addr;
    }

    /// Seeds a general-purpose register.
    pub fn set_reg(&mut self, idx: usize, val: u32) {
        self.machine.boot_hart_mut().regs.write(idx, val);
    }

    /// Reads a general-purpose register.
    pub fn reg(&self, idx: usize) -> u32 {
        self.machine.boot_hart().regs.read(idx)
    }

    /// Returns the current program counter.
    pub fn pc(&self) -> u32 {
        self.machine.boot_hart().pc
    }

    /// Writes one word of memory through the bus.
    pub fn write_word(&mut self, addr: u32, val: u32) {
        self.machine.boot_hart_mut().bus.write_u32(u64::from(addr), val);
    }

    /// Reads one word of memory through the bus.
    pub fn read_word(&mut self, addr: u32) -> u32 {
        self.machine.boot_hart_mut().bus.read_u32(u64::from(addr))
    }

    /// Retires `n` instructions, panicking on any trap.
    pub fn run(&mut self, n: u64) {
        self.machine.step(n).unwrap();
    }

    /// Steps one instruction and returns the trap it raised.
    pub fn step_trap(&mut self) -> Trap {
        match self.machine.step(1) {
            Err(MachineError::Exec(trap)) => trap,
            Err(other) => panic!("expected a trap, got: {other}"),
            Ok(()) => panic!("expected a trap, but the instruction retired"),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
