//! C bindings exposing the reference machine to a lockstep checker.
//!
//! This crate exposes the machine over the C ABI a device-under-test host
//! loads with `dlopen`. It provides:
//! 1. **Initialization:** `difftest_init` builds the process-wide session from a boot image.
//! 2. **Register transfer:** `difftest_regcpy` copies register state in either direction.
//! 3. **Execution:** `difftest_exec` retires a batch of instructions on the reference hart.
//!
//! Every entry point returns zero on success and a negative status code
//! from [`protocol`] on failure; failures are also logged through `tracing`
//! (filtered by `RUST_LOG`, written to stderr).

use std::ffi::{CStr, c_char, c_int};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, Once};

use rvdiff_core::Session;
use rvdiff_core::difftest::{RegisterSnapshot, TransferDirection};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Status codes and configuration resolution for the C boundary.
pub mod protocol;

/// The process-wide session driven by the checker.
///
/// The lockstep protocol is single-threaded by contract; the mutex only
/// keeps the global data-race-free.
static SESSION: Mutex<Option<Session>> = Mutex::new(None);

/// One-shot guard for subscriber installation.
static LOG_INIT: Once = Once::new();

/// Installs the `tracing` subscriber on first use.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Output goes to
/// stderr; stdout belongs to the host process.
fn init_logging() {
    LOG_INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

/// Locks the session slot, recovering the guard if a previous caller panicked.
fn session_slot() -> MutexGuard<'static, Option<Session>> {
    SESSION
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Builds the process-wide session from a boot image.
///
/// Exactly `img_size` bytes are read from the image file and placed at the
/// base of main memory. The machine description comes from the JSON file
/// named by the `RVDIFF_CONFIG` environment variable when set, and is the
/// default RV32I machine otherwise.
///
/// # Arguments
///
/// * `img` - NUL-terminated path to the raw boot image.
/// * `img_size` - Exact number of image bytes to read and place.
///
/// # Returns
///
/// [`protocol::STATUS_OK`], or a negative status code naming the failure.
///
/// # Safety
///
/// `img` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn difftest_init(img: *const c_char, img_size: u64) -> c_int {
    init_logging();

    if img.is_null() {
        error!("difftest_init: image path is null");
        return protocol::STATUS_NULL_POINTER;
    }
    // SAFETY: non-null was checked above; the caller guarantees a
    // NUL-terminated string valid for this call.
    let raw_path = unsafe { CStr::from_ptr(img) };
    let Ok(path) = raw_path.to_str() else {
        error!("difftest_init: image path is not valid UTF-8");
        return protocol::STATUS_BAD_PATH;
    };

    let config = match protocol::resolve_config() {
        Ok(config) => config,
        Err(reason) => {
            error!("difftest_init: {reason}");
            return protocol::STATUS_BAD_CONFIG;
        }
    };

    let mut slot = session_slot();
    if slot.is_some() {
        error!("difftest_init: session already initialized");
        return protocol::STATUS_ALREADY_INITIALIZED;
    }
    match Session::initialize(config, Path::new(path), img_size) {
        Ok(session) => {
            *slot = Some(session);
            protocol::STATUS_OK
        }
        Err(err) => {
            error!("difftest_init: {err}");
            protocol::STATUS_INIT_FAILED
        }
    }
}

/// Copies register state between the reference machine and the checker's
/// context buffer.
///
/// Direction 0 copies reference state out into `ctx`; direction 1 copies
/// `ctx` into the reference machine. The buffer layout is
/// [`RegisterSnapshot`]: thirty-two general purpose registers in index
/// order, then the program counter.
///
/// # Arguments
///
/// * `ctx` - The checker's register context buffer.
/// * `direction` - Transfer direction code.
///
/// # Returns
///
/// [`protocol::STATUS_OK`], or a negative status code naming the failure.
///
/// # Safety
///
/// `ctx` must be null or point to a writable buffer with
/// [`RegisterSnapshot`]'s size and alignment that stays valid for the
/// duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn difftest_regcpy(ctx: *mut RegisterSnapshot, direction: u32) -> c_int {
    init_logging();

    if ctx.is_null() {
        error!("difftest_regcpy: context buffer is null");
        return protocol::STATUS_NULL_POINTER;
    }
    let Some(direction) = TransferDirection::from_raw(direction) else {
        error!("difftest_regcpy: unknown direction code {direction}");
        return protocol::STATUS_BAD_DIRECTION;
    };

    let mut slot = session_slot();
    let Some(session) = slot.as_mut() else {
        error!("difftest_regcpy: no initialized session");
        return protocol::STATUS_NOT_INITIALIZED;
    };
    // SAFETY: non-null was checked above; the caller guarantees a properly
    // aligned snapshot buffer valid for this call.
    let snapshot = unsafe { &mut *ctx };
    session.transfer_registers(snapshot, direction);
    protocol::STATUS_OK
}

/// Retires `n` instructions on the reference hart.
///
/// On an architectural fault the hart stays at the faulting instruction and
/// its state remains readable through `difftest_regcpy`, so the checker can
/// report the divergence point.
///
/// # Arguments
///
/// * `n` - Number of instructions to retire; zero is a no-op.
///
/// # Returns
///
/// [`protocol::STATUS_OK`], or a negative status code naming the failure.
#[unsafe(no_mangle)]
pub extern "C" fn difftest_exec(n: u64) -> c_int {
    init_logging();

    let mut slot = session_slot();
    let Some(session) = slot.as_mut() else {
        error!("difftest_exec: no initialized session");
        return protocol::STATUS_NOT_INITIALIZED;
    };
    match session.advance(n) {
        Ok(()) => protocol::STATUS_OK,
        Err(err) => {
            error!("difftest_exec: {err}");
            protocol::STATUS_EXEC_FAULT
        }
    }
}
