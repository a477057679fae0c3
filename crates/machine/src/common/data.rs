//! Memory access classification.
//!
//! Every checked bus access carries an [`AccessType`], so a fault on the
//! same address reports a different cause depending on what the hart was
//! doing with it: fetching an instruction, loading data, or storing it.

/// What a memory access is for.
///
/// The alignment and claim checks take this alongside the address and
/// select the matching trap variant from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch ahead of decode.
    Fetch,
    /// Data load into a register.
    Read,
    /// Data store out of a register.
    Write,
}
