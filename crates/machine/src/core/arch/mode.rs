//! Hart privilege levels.
//!
//! The machine model executes entirely in one privilege mode fixed at
//! construction; the mode matters only for reporting, most visibly in
//! choosing which environment-call trap an `ECALL` raises.

use serde::{Deserialize, Serialize};

/// A RISC-V privilege level.
///
/// Discriminants are the architectural encodings, so the numeric gap at 2
/// (the reserved hypervisor level) is preserved. Ordering follows
/// privilege: `User < Supervisor < Machine`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivilegeMode {
    /// U-mode, for application code.
    User = 0,
    /// S-mode, for operating system kernels.
    Supervisor = 1,
    /// M-mode, the level firmware boots in and the model's default.
    Machine = 3,
}

impl PrivilegeMode {
    /// Decodes an architectural encoding, treating anything undefined
    /// (including the reserved value 2) as `Machine`.
    pub fn from_u8(val: u8) -> Self {
        match val {
            0 => PrivilegeMode::User,
            1 => PrivilegeMode::Supervisor,
            _ => PrivilegeMode::Machine,
        }
    }

    /// Returns the architectural encoding (0, 1, or 3).
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Returns the mode's display name.
    pub fn name(&self) -> &'static str {
        match self {
            PrivilegeMode::User => "User",
            PrivilegeMode::Supervisor => "Supervisor",
            PrivilegeMode::Machine => "Machine",
        }
    }
}

impl std::fmt::Display for PrivilegeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
