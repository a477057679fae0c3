//! Shared building blocks: architectural constants, memory access
//! classification, and the error types the rest of the crate reports.

/// Architectural constants.
pub mod constants;

/// Memory access classification.
pub mod data;

/// Traps and machine-level errors.
pub mod error;

pub use data::AccessType;
pub use error::{MachineError, MachineResult, Trap};
