//! Lockstep state transfer between this machine and a device under test.
//!
//! This module implements the reference side of a lockstep checking setup:
//! an external checker runs a device under test and this machine on the same
//! image, transferring and comparing register state as both advance. It
//! provides:
//! 1. **Snapshots:** C-layout register images exchanged across the boundary.
//! 2. **State transfer:** Direction-tagged copies between hart and snapshot.
//! 3. **Sessions:** One initialized machine driven in lockstep by a checker.

pub mod session;
pub mod snapshot;
pub mod state;

pub use self::session::Session;
pub use self::snapshot::{RegisterSnapshot, TransferDirection};
