//! Hart Definition and Initialization.
//!
//! This module defines the central `Hart` structure, which serves as the container for
//! one hardware thread's architectural state. It coordinates the following:
//! 1. **State Management:** Maintains registers, program counter, and privilege mode.
//! 2. **Execution:** Single-instruction stepping through fetch, decode, and execute.
//! 3. **System Integration:** Interfaces with the system bus and memory regions.

/// Instruction execution and opcode dispatch.
pub mod execution;

/// Checked loads, stores, and fetches.
pub mod memory;

use tracing::debug;

use crate::config::MachineConfig;
use crate::core::arch::gpr::Gpr;
use crate::core::arch::mode::PrivilegeMode;
use crate::soc::interconnect::Bus;
use crate::soc::memory::Memory;
use crate::soc::memory::buffer::DramBuffer;

/// One RISC-V hardware thread and the memory system it executes against.
///
/// The hart owns its bus: all loads, stores, and fetches issued while stepping
/// go through the same routing as image loading, so the state a checker observes
/// is produced by a single access path.
#[derive(Debug)]
pub struct Hart {
    /// General Purpose Registers (x0-x31).
    pub regs: Gpr,
    /// Address of the next instruction to fetch.
    pub pc: u32,
    /// Privilege level, fixed at construction.
    pub privilege: PrivilegeMode,
    /// Hart index within the machine.
    pub id: usize,
    /// Number of retired instructions.
    pub instret: u64,
    /// When true, misaligned data accesses are performed instead of trapping.
    pub allow_misaligned: bool,
    /// System bus and memory devices.
    pub bus: Bus,
}

impl Hart {
    /// Creates a new hart with the architectural reset state described by the configuration.
    ///
    /// Builds one DRAM device per configured memory region and points the program
    /// counter at the configured reset vector.
    ///
    /// # Arguments
    ///
    /// * `config` - The machine configuration (must already be validated).
    /// * `id` - Hart index within the machine.
    ///
    /// # Returns
    ///
    /// A new `Hart` with zeroed registers and an empty instruction count.
    pub fn new(config: &MachineConfig, id: usize) -> Self {
        let mut bus = Bus::new();
        for region in &config.memory {
            let buffer = DramBuffer::new(region.size as usize);
            bus.add_device(Box::new(Memory::new(buffer, region.base)));
        }

        Self {
            regs: Gpr::new(),
            pc: config.boot_pc() as u32,
            privilege: config.privilege,
            id,
            instret: 0,
            allow_misaligned: config.misaligned,
            bus,
        }
    }

    /// Dumps the current hart state (PC and registers) at debug level.
    pub fn dump_state(&self) {
        debug!("PC = {:#010x}", self.pc);
        self.regs.dump();
    }
}
