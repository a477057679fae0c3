//! The modeled system fabric.
//!
//! This module organizes the components that make up the modeled system:
//! the system bus, the device trait, and the DRAM memory device.

/// Physical address routing.
pub mod interconnect;

/// Memory device implementations.
pub mod memory;

/// Device trait definitions for bus access.
pub mod traits;

pub use interconnect::Bus;
pub use memory::Memory;
pub use traits::Device;
