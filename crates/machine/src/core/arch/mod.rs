//! Architectural state shared by the hart: the register file and the
//! privilege levels it can run at.

/// The general-purpose register file.
pub mod gpr;

/// Privilege levels.
pub mod mode;
