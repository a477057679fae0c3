//! Status codes and configuration resolution for the C boundary.
//!
//! A checker treats any nonzero return as fatal for the differential run;
//! the distinct codes exist so return values and logs agree on what failed.

use std::env;
use std::ffi::c_int;
use std::fs;

use rvdiff_core::MachineConfig;

/// Environment variable naming a JSON machine description file.
pub const CONFIG_ENV: &str = "RVDIFF_CONFIG";

/// The call succeeded.
pub const STATUS_OK: c_int = 0;

/// `difftest_init` was called on an already initialized session.
pub const STATUS_ALREADY_INITIALIZED: c_int = -1;

/// A call other than `difftest_init` arrived before initialization.
pub const STATUS_NOT_INITIALIZED: c_int = -2;

/// A required pointer argument was null.
pub const STATUS_NULL_POINTER: c_int = -3;

/// The image path was not valid UTF-8.
pub const STATUS_BAD_PATH: c_int = -4;

/// The machine description could not be read or parsed.
pub const STATUS_BAD_CONFIG: c_int = -5;

/// Machine construction or image loading failed.
pub const STATUS_INIT_FAILED: c_int = -6;

/// The direction code was neither 0 nor 1.
pub const STATUS_BAD_DIRECTION: c_int = -7;

/// Execution stopped on an architectural fault.
pub const STATUS_EXEC_FAULT: c_int = -8;

/// Resolves the machine description for a new session.
///
/// Reads the JSON file named by [`CONFIG_ENV`] when the variable is set;
/// otherwise uses the default RV32I machine.
///
/// # Errors
///
/// Returns a description of the failure when the variable names a file
/// that cannot be read or parsed.
pub fn resolve_config() -> Result<MachineConfig, String> {
    match env::var(CONFIG_ENV) {
        Ok(path) => {
            let text = fs::read_to_string(&path)
                .map_err(|err| format!("cannot read machine description {path}: {err}"))?;
            serde_json::from_str(&text)
                .map_err(|err| format!("cannot parse machine description {path}: {err}"))
        }
        Err(env::VarError::NotPresent) => Ok(MachineConfig::default()),
        Err(err) => Err(format!("cannot read {CONFIG_ENV}: {err}")),
    }
}
