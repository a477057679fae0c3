//! RISC-V reference machine for lockstep differential testing.
//!
//! This crate implements an RV32I reference machine driven in lockstep with a
//! device under test, with the following:
//! 1. **Core:** Hart architectural state (GPRs, PC, privilege mode) and single-instruction stepping.
//! 2. **ISA:** Decoding and execution for the RV32I base integer instruction set.
//! 3. **SoC:** Interconnect and DRAM-backed memory regions.
//! 4. **Simulation:** Machine assembly, configuration, and boot image loading.
//! 5. **Difftest:** Register snapshots, state transfer, and checker-driven sessions.

/// Common types and constants (registers, traps, access types, errors).
pub mod common;
/// Machine configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// Hart state, execution, and memory access.
pub mod core;
/// Lockstep state transfer (snapshots, state copies, sessions).
pub mod difftest;
/// Instruction set (decode, instruction, ABI, RV32I).
pub mod isa;
/// Machine assembly and boot image loading.
pub mod sim;
/// System-on-chip (interconnect, memory, device traits).
pub mod soc;

/// Root configuration type; use `MachineConfig::default()` or deserialize from JSON.
pub use crate::config::MachineConfig;
/// Single hart; holds registers, program counter, and the system bus.
pub use crate::core::Hart;
/// Checker-driven lockstep session; construct with `Session::initialize`.
pub use crate::difftest::Session;
/// Top-level machine (configuration + hart); construct with `Machine::new`.
pub use crate::sim::Machine;
