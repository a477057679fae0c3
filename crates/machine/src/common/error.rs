//! Trap and Machine Error definitions.
//!
//! This module defines the error handling for the machine. It provides:
//! 1. **Trap Representation:** Encompassing the synchronous exceptions an RV32I hart can raise.
//! 2. **Machine Errors:** Reporting construction, image loading, and execution failures.
//! 3. **Error Handling:** Wiring both types into the standard error traits for callers.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// The synchronous exceptions an RV32I machine-mode hart can raise.
///
/// A trap aborts the current instruction and surfaces to the caller
/// unchanged; nothing in this machine vectors to a handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trap {
    /// A control transfer targeted an address that is not a multiple of
    /// the instruction size. Carries the bad target.
    InstructionAddressMisaligned(u32),

    /// An instruction fetch touched memory no device claims. Carries the
    /// faulting address.
    InstructionAccessFault(u32),

    /// The word at the program counter is not a valid RV32I encoding.
    /// Carries the word itself.
    IllegalInstruction(u32),

    /// An `EBREAK` retired. Carries the program counter it sat at.
    Breakpoint(u32),

    /// A load used an address unaligned for its width.
    LoadAddressMisaligned(u32),

    /// A load touched memory no device claims.
    LoadAccessFault(u32),

    /// A store used an address unaligned for its width.
    StoreAddressMisaligned(u32),

    /// A store touched memory no device claims.
    StoreAccessFault(u32),

    /// `ECALL` from user mode.
    EnvironmentCallFromUMode,

    /// `ECALL` from supervisor mode.
    EnvironmentCallFromSMode,

    /// `ECALL` from machine mode.
    EnvironmentCallFromMMode,
}

impl fmt::Display for Trap {
    /// Variant name with the associated value in hex, as in
    /// `IllegalInstruction(0xffffffff)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trap::InstructionAddressMisaligned(addr) => {
                write!(f, "InstructionAddressMisaligned({:#x})", addr)
            }
            Trap::InstructionAccessFault(addr) => {
                write!(f, "InstructionAccessFault({:#x})", addr)
            }
            Trap::IllegalInstruction(inst) => write!(f, "IllegalInstruction({:#x})", inst),
            Trap::Breakpoint(pc) => write!(f, "Breakpoint({:#x})", pc),
            Trap::LoadAddressMisaligned(addr) => write!(f, "LoadAddressMisaligned({:#x})", addr),
            Trap::LoadAccessFault(addr) => write!(f, "LoadAccessFault({:#x})", addr),
            Trap::StoreAddressMisaligned(addr) => {
                write!(f, "StoreAddressMisaligned({:#x})", addr)
            }
            Trap::StoreAccessFault(addr) => write!(f, "StoreAccessFault({:#x})", addr),
            Trap::EnvironmentCallFromUMode => write!(f, "EnvironmentCallFromUMode"),
            Trap::EnvironmentCallFromSMode => write!(f, "EnvironmentCallFromSMode"),
            Trap::EnvironmentCallFromMMode => write!(f, "EnvironmentCallFromMMode"),
        }
    }
}

impl std::error::Error for Trap {}

/// Errors reported by machine construction, image loading, and execution.
///
/// Construction and loading failures are unrecoverable for the session that
/// triggered them. Execution faults wrap the underlying [`Trap`] unchanged.
#[derive(Debug, thiserror::Error)]
pub enum MachineError {
    /// The supplied configuration describes a machine this model cannot build.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The boot image could not be opened or read.
    #[error("failed to read boot image {}", path.display())]
    ImageIo {
        /// Path of the image that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The boot image ended before the declared number of bytes was read.
    #[error("boot image {} truncated: expected {expected} bytes, read {actual}", path.display())]
    ImageTruncated {
        /// Path of the truncated image.
        path: PathBuf,
        /// Number of bytes the caller declared.
        expected: u64,
        /// Number of bytes actually read.
        actual: u64,
    },

    /// The boot image does not fit in the main memory region.
    #[error("boot image of {size} bytes exceeds memory capacity of {capacity} bytes")]
    ImageTooLarge {
        /// Size of the image in bytes.
        size: u64,
        /// Capacity of the main memory region in bytes.
        capacity: u64,
    },

    /// The requested hart id does not exist on this machine.
    #[error("unknown hart id {0}")]
    UnknownHart(usize),

    /// A hart raised a trap during execution.
    #[error("execution fault: {0}")]
    Exec(#[from] Trap),
}

/// Convenience alias for results carrying a [`MachineError`].
pub type MachineResult<T> = Result<T, MachineError>;
