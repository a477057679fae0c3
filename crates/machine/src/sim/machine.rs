//! Machine assembly and stepping.
//!
//! This module defines the top-level `Machine` structure, which owns the
//! configuration and the hart it describes. It provides:
//! 1. **Construction:** Validates a configuration and assembles the hart and its memory.
//! 2. **Stepping:** Batched instruction execution with fault propagation.
//! 3. **Hart access:** Checked and direct accessors for architectural state.

use tracing::info;

use crate::common::error::{MachineError, MachineResult};
use crate::config::MachineConfig;
use crate::core::Hart;

/// Top-level machine: the configuration plus the hart built from it.
#[derive(Debug)]
pub struct Machine {
    /// The validated configuration this machine was built from.
    config: MachineConfig,
    /// The single modeled hart.
    hart: Hart,
}

impl Machine {
    /// Builds a machine from a configuration.
    ///
    /// The configuration is validated first, so no memory is allocated for a
    /// machine this model cannot build.
    ///
    /// # Arguments
    ///
    /// * `config` - The machine description.
    ///
    /// # Errors
    ///
    /// Returns [`MachineError::InvalidConfig`] when the configuration
    /// describes a machine outside this model.
    pub fn new(config: MachineConfig) -> MachineResult<Self> {
        config.validate()?;
        let hart = Hart::new(&config, 0);
        info!(
            "assembled {} machine: {} memory region(s), boot pc {:#010x}",
            config.isa,
            config.memory.len(),
            hart.pc
        );
        Ok(Self { config, hart })
    }

    /// Returns the configuration this machine was built from.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Returns the hart with the given index.
    ///
    /// # Errors
    ///
    /// Returns [`MachineError::UnknownHart`] when no hart has that index.
    pub fn hart(&self, id: usize) -> MachineResult<&Hart> {
        if id == self.hart.id {
            Ok(&self.hart)
        } else {
            Err(MachineError::UnknownHart(id))
        }
    }

    /// Returns the hart with the given index, mutably.
    ///
    /// # Errors
    ///
    /// Returns [`MachineError::UnknownHart`] when no hart has that index.
    pub fn hart_mut(&mut self, id: usize) -> MachineResult<&mut Hart> {
        if id == self.hart.id {
            Ok(&mut self.hart)
        } else {
            Err(MachineError::UnknownHart(id))
        }
    }

    /// Returns the hart that receives the boot image (hart 0).
    pub fn boot_hart(&self) -> &Hart {
        &self.hart
    }

    /// Returns the boot hart, mutably.
    pub fn boot_hart_mut(&mut self) -> &mut Hart {
        &mut self.hart
    }

    /// Executes `n` instructions on the boot hart.
    ///
    /// Stops at the first fault. The hart is left at the faulting instruction
    /// with no partial architectural effects committed, so its state can be
    /// read back for diagnosis.
    ///
    /// # Arguments
    ///
    /// * `n` - Number of instructions to retire; zero is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`MachineError::Exec`] wrapping the trap the faulting
    /// instruction raised.
    pub fn step(&mut self, n: u64) -> MachineResult<()> {
        for _ in 0..n {
            self.hart.step()?;
        }
        Ok(())
    }
}
