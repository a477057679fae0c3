//! The processor core.
//!
//! This module contains the hart implementation including instruction
//! execution, memory access, and architecture-specific components.

/// Architecture-specific components (register files, privilege modes).
pub mod arch;

/// Hart implementation and execution stepping.
pub mod hart;

pub use self::hart::Hart;
