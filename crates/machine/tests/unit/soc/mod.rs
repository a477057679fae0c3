//! System-on-chip component tests.

/// Bus routing and address claim tests.
pub mod interconnect;
