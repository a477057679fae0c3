//! Register indices under the standard RISC-V calling convention.
//!
//! The hart itself only knows `x0`-`x31`; these constants give the
//! conventional roles names so call-shaped test programs and diagnostics
//! read like assembly listings.

/// `zero` (x0), hardwired to zero.
pub const REG_ZERO: usize = 0;
/// `ra` (x1), the return address link register.
pub const REG_RA: usize = 1;
/// `sp` (x2), the stack pointer.
pub const REG_SP: usize = 2;
/// `a0` (x10), first argument and primary return value.
pub const REG_A0: usize = 10;
/// `a1` (x11), second argument.
pub const REG_A1: usize = 11;
/// `a2` (x12), third argument.
pub const REG_A2: usize = 12;
/// `a7` (x17), the environment-call number register.
pub const REG_A7: usize = 17;
