//! Lockstep session lifecycle.
//!
//! This module ties machine construction, image loading, and stepping into
//! one session driven by an external checker. It provides:
//! 1. **Initialization:** Builds a machine from configuration and loads the boot image.
//! 2. **Register transfer:** Direction-tagged state copies for lockstep comparison.
//! 3. **Batched execution:** Instruction stepping with a state dump on fault.

use std::path::Path;

use tracing::debug;

use crate::common::error::MachineResult;
use crate::config::MachineConfig;
use crate::difftest::snapshot::{RegisterSnapshot, TransferDirection};
use crate::difftest::state;
use crate::sim::loader;
use crate::sim::machine::Machine;

/// One lockstep checking session.
///
/// A session owns the machine for its whole lifetime. The checker drives it
/// through three operations: transfer register state, execute a batch of
/// instructions, and compare.
///
/// The lockstep protocol is single-threaded. All methods take `&mut self`
/// and the session performs no internal locking; callers that share a
/// session across threads must serialize access themselves.
#[derive(Debug)]
pub struct Session {
    machine: Machine,
}

impl Session {
    /// Builds the machine and loads the boot image, producing a ready session.
    ///
    /// After this returns, the hart sits at the reset vector with zeroed
    /// registers and the image in place, so the first register transfer a
    /// checker performs observes the architectural reset state.
    ///
    /// # Arguments
    ///
    /// * `config` - The machine description.
    /// * `image` - Path to the raw boot image.
    /// * `image_size` - Exact number of image bytes to read and place.
    ///
    /// # Errors
    ///
    /// Returns [`MachineError::InvalidConfig`](crate::common::error::MachineError::InvalidConfig)
    /// when the configuration is not buildable, and the image loading errors
    /// of [`loader::load_image`] otherwise.
    pub fn initialize(config: MachineConfig, image: &Path, image_size: u64) -> MachineResult<Self> {
        let mut machine = Machine::new(config)?;
        loader::load_image(&mut machine, image, image_size)?;
        debug!(
            "session ready: pc={:#010x}, {} image bytes",
            machine.boot_hart().pc,
            image_size
        );
        Ok(Self { machine })
    }

    /// Copies register state between the machine and a snapshot.
    ///
    /// The copy itself cannot fail; direction codes are decoded before this
    /// point.
    ///
    /// # Arguments
    ///
    /// * `snapshot` - The snapshot to fill or consume.
    /// * `direction` - Which side's state wins.
    pub fn transfer_registers(
        &mut self,
        snapshot: &mut RegisterSnapshot,
        direction: TransferDirection,
    ) {
        match direction {
            TransferDirection::RefToDut => state::read_state(self.machine.boot_hart(), snapshot),
            TransferDirection::DutToRef => state::write_state(self.machine.boot_hart_mut(), snapshot),
        }
        debug!("transferred registers {:?}, pc={:#010x}", direction, self.pc());
    }

    /// Executes `n` instructions, dumping hart state if a fault stops the batch.
    ///
    /// On fault the hart stays at the faulting instruction, so the state the
    /// dump and any later register transfer observe is the state at the point
    /// of divergence.
    ///
    /// # Arguments
    ///
    /// * `n` - Number of instructions to retire; zero is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`MachineError::Exec`](crate::common::error::MachineError::Exec)
    /// wrapping the trap that stopped the batch.
    pub fn advance(&mut self, n: u64) -> MachineResult<()> {
        if let Err(err) = self.machine.step(n) {
            debug!(
                "fault after {} retired instructions: {}",
                self.machine.boot_hart().instret,
                err
            );
            self.machine.boot_hart().dump_state();
            return Err(err);
        }
        debug!("batch of {} retired, pc={:#010x}", n, self.pc());
        Ok(())
    }

    /// Returns the boot hart's current program counter.
    pub fn pc(&self) -> u32 {
        self.machine.boot_hart().pc
    }

    /// Returns the machine this session drives.
    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Returns the machine this session drives, mutably.
    pub fn machine_mut(&mut self) -> &mut Machine {
        &mut self.machine
    }
}
