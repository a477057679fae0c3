//! Machine assembly and program loading.
//!
//! Provides the top-level machine built from a validated configuration and
//! the loader that places boot images into its memory.

pub mod loader;
pub mod machine;

pub use self::machine::Machine;
