//! Configuration system for the reference machine.
//!
//! Describes the machine a host wants built. It provides:
//! 1. **Defaults:** Baseline hardware constants (ISA, memory map, hart count).
//! 2. **Structures:** Hierarchical config for the machine, memory regions, and debug module.
//! 3. **Validation:** Explicit checks that the described machine is one this model can build.
//!
//! Configuration is supplied via JSON from the C bindings or use `MachineConfig::default()`.

use serde::Deserialize;

use crate::common::constants::{INSTRUCTION_SIZE, PHYS_ADDR_SPACE};
use crate::common::error::{MachineError, MachineResult};
use crate::core::arch::mode::PrivilegeMode;

/// Default configuration constants for the machine.
///
/// Baseline hardware values used wherever the supplied JSON leaves a
/// field unset.
mod defaults {
    /// ISA string for the modeled hart.
    pub const ISA: &str = "RV32I";

    /// Where main RAM begins, the 2 GiB mark.
    ///
    /// Boot images land here, at offset zero of region 0.
    pub const RAM_BASE: u64 = 0x8000_0000;

    /// Main RAM size, 128 MiB.
    ///
    /// Anything past `RAM_BASE + RAM_SIZE` is unclaimed and faults on
    /// access.
    pub const RAM_SIZE: u64 = 128 * 1024 * 1024;

    /// Number of hardware threads.
    pub const HARTS: usize = 1;

    /// Number of hardware debug triggers.
    pub const TRIGGERS: u32 = 4;

    /// Debug module program buffer size in 32-bit words.
    pub const PROGBUF_WORDS: u32 = 2;
}

/// Memory byte order of the modeled machine.
///
/// Only little-endian machines can be built; the big-endian variant exists
/// so a configuration asking for one is rejected explicitly rather than
/// silently misread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    /// Little-endian byte order.
    #[default]
    #[serde(alias = "le")]
    Little,
    /// Big-endian byte order (rejected at validation).
    #[serde(alias = "be")]
    Big,
}

/// One physical memory region backed by DRAM.
///
/// Region 0 is the main memory region and receives the boot image.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryRegion {
    /// Physical base address of the region.
    pub base: u64,
    /// Region size in bytes.
    pub size: u64,
}

/// Debug module parameters.
///
/// The execution model has no debug module; these values are carried so a
/// checker that built its expectations around them can read them back.
#[derive(Debug, Clone, Deserialize)]
pub struct DebugModuleConfig {
    /// Program buffer size in 32-bit words.
    #[serde(default = "DebugModuleConfig::default_progbuf_words")]
    pub progbuf_words: u32,

    /// Maximum system bus access width in bits (0 disables system bus access).
    #[serde(default)]
    pub sba_data_width: u32,

    /// Whether debugger access requires authentication.
    #[serde(default)]
    pub require_authentication: bool,

    /// Whether abstract commands can access CSRs.
    #[serde(default = "DebugModuleConfig::default_abstract_csr_access")]
    pub abstract_csr_access: bool,

    /// Whether abstract commands can access floating-point registers.
    #[serde(default = "DebugModuleConfig::default_abstract_fpr_access")]
    pub abstract_fpr_access: bool,

    /// Whether halt groups are supported.
    #[serde(default = "DebugModuleConfig::default_support_haltgroups")]
    pub support_haltgroups: bool,

    /// Whether an implicit EBREAK terminates the program buffer.
    #[serde(default = "DebugModuleConfig::default_support_impebreak")]
    pub support_impebreak: bool,
}

impl DebugModuleConfig {
    /// Returns the default program buffer size in words.
    fn default_progbuf_words() -> u32 {
        defaults::PROGBUF_WORDS
    }

    /// Abstract CSR access defaults to available.
    fn default_abstract_csr_access() -> bool {
        true
    }

    /// Abstract FPR access defaults to available.
    fn default_abstract_fpr_access() -> bool {
        true
    }

    /// Halt group support defaults to available.
    fn default_support_haltgroups() -> bool {
        true
    }

    /// Implicit EBREAK support defaults to available.
    fn default_support_impebreak() -> bool {
        true
    }
}

impl Default for DebugModuleConfig {
    fn default() -> Self {
        Self {
            progbuf_words: defaults::PROGBUF_WORDS,
            sba_data_width: 0,
            require_authentication: false,
            abstract_csr_access: true,
            abstract_fpr_access: true,
            support_haltgroups: true,
            support_impebreak: true,
        }
    }
}

/// Root configuration structure describing the machine to build.
///
/// Configuration is supplied by the checker as JSON, or use
/// `MachineConfig::default()` for the standard single-hart RV32I machine.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use rvdiff_core::config::MachineConfig;
///
/// let config = MachineConfig::default();
/// assert_eq!(config.isa, "RV32I");
/// assert_eq!(config.memory[0].base, 0x8000_0000);
/// assert_eq!(config.memory[0].size, 128 * 1024 * 1024);
/// ```
///
/// Deserializing from JSON (typical checker-side usage):
///
/// ```
/// use rvdiff_core::config::MachineConfig;
///
/// let json = r#"{
///     "isa": "RV32I",
///     "privilege": "machine",
///     "endianness": "little",
///     "memory": [
///         { "base": 2147483648, "size": 134217728 }
///     ],
///     "harts": 1,
///     "triggers": 4,
///     "pmp_regions": 0,
///     "misaligned": false,
///     "debug_module": {
///         "progbuf_words": 2,
///         "sba_data_width": 0,
///         "require_authentication": false,
///         "abstract_csr_access": true,
///         "abstract_fpr_access": true,
///         "support_haltgroups": true,
///         "support_impebreak": true
///     }
/// }"#;
///
/// let config: MachineConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.harts, 1);
/// assert_eq!(config.memory[0].base, 0x8000_0000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct MachineConfig {
    /// ISA string for the hart (only `"RV32I"` is modeled).
    #[serde(default = "MachineConfig::default_isa")]
    pub isa: String,

    /// Vector architecture variant string; carried in the description but
    /// not modeled.
    #[serde(default)]
    pub variant: String,

    /// Privilege mode the hart starts in.
    #[serde(default = "MachineConfig::default_privilege")]
    pub privilege: PrivilegeMode,

    /// Memory byte order (only little-endian machines can be built).
    #[serde(default)]
    pub endianness: Endianness,

    /// Physical memory regions; region 0 receives the boot image.
    #[serde(default = "MachineConfig::default_memory")]
    pub memory: Vec<MemoryRegion>,

    /// Number of hardware threads (exactly one is modeled).
    #[serde(default = "MachineConfig::default_harts")]
    pub harts: usize,

    /// Number of hardware debug triggers.
    #[serde(default = "MachineConfig::default_triggers")]
    pub triggers: u32,

    /// Number of physical memory protection regions (must be zero).
    #[serde(default)]
    pub pmp_regions: u32,

    /// When true, misaligned data accesses are performed instead of trapping.
    #[serde(default)]
    pub misaligned: bool,

    /// Initial program counter. Defaults to the base of memory region 0.
    #[serde(default)]
    pub reset_vector: Option<u64>,

    /// Debug module parameters.
    #[serde(default)]
    pub debug_module: DebugModuleConfig,
}

impl MachineConfig {
    /// Returns the default ISA string.
    fn default_isa() -> String {
        defaults::ISA.to_owned()
    }

    /// Machines boot in machine mode by default.
    fn default_privilege() -> PrivilegeMode {
        PrivilegeMode::Machine
    }

    /// Returns the default memory map: one main RAM region.
    fn default_memory() -> Vec<MemoryRegion> {
        vec![MemoryRegion {
            base: defaults::RAM_BASE,
            size: defaults::RAM_SIZE,
        }]
    }

    /// Returns the default hart count.
    fn default_harts() -> usize {
        defaults::HARTS
    }

    /// Returns the default trigger count.
    fn default_triggers() -> u32 {
        defaults::TRIGGERS
    }

    /// Returns the initial program counter.
    ///
    /// The configured reset vector when set, otherwise the base of memory
    /// region 0.
    pub fn boot_pc(&self) -> u64 {
        self.reset_vector
            .unwrap_or_else(|| self.memory.first().map_or(defaults::RAM_BASE, |r| r.base))
    }

    /// Returns the memory region that receives the boot image (region 0).
    pub fn main_memory(&self) -> Option<&MemoryRegion> {
        self.memory.first()
    }

    /// Checks that the described machine is one this model can build.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the configuration is buildable, or `InvalidConfig` naming
    /// the first offending setting.
    ///
    /// # Errors
    ///
    /// Returns [`MachineError::InvalidConfig`] when the ISA string, byte
    /// order, hart count, PMP region count, memory map, or reset vector
    /// describe a machine outside this model.
    pub fn validate(&self) -> MachineResult<()> {
        if self.isa != defaults::ISA {
            return Err(MachineError::InvalidConfig(format!(
                "unsupported isa `{}` (only {} is modeled)",
                self.isa,
                defaults::ISA
            )));
        }
        if self.endianness != Endianness::Little {
            return Err(MachineError::InvalidConfig(
                "big-endian machines are not modeled".to_owned(),
            ));
        }
        if self.harts != defaults::HARTS {
            return Err(MachineError::InvalidConfig(format!(
                "exactly one hart is modeled, {} requested",
                self.harts
            )));
        }
        if self.pmp_regions != 0 {
            return Err(MachineError::InvalidConfig(format!(
                "physical memory protection is not modeled ({} regions requested)",
                self.pmp_regions
            )));
        }
        if self.memory.is_empty() {
            return Err(MachineError::InvalidConfig(
                "at least one memory region is required".to_owned(),
            ));
        }
        for region in &self.memory {
            if region.size == 0 {
                return Err(MachineError::InvalidConfig(format!(
                    "memory region at {:#x} has zero size",
                    region.base
                )));
            }
            let end = region.base.checked_add(region.size).ok_or_else(|| {
                MachineError::InvalidConfig(format!(
                    "memory region at {:#x} overflows the address space",
                    region.base
                ))
            })?;
            if end > PHYS_ADDR_SPACE {
                return Err(MachineError::InvalidConfig(format!(
                    "memory region at {:#x} extends past the 32-bit address space",
                    region.base
                )));
            }
        }
        let pc = self.boot_pc();
        if pc >= PHYS_ADDR_SPACE {
            return Err(MachineError::InvalidConfig(format!(
                "reset vector {:#x} is outside the 32-bit address space",
                pc
            )));
        }
        if pc % u64::from(INSTRUCTION_SIZE) != 0 {
            return Err(MachineError::InvalidConfig(format!(
                "reset vector {:#x} is not aligned to the instruction size",
                pc
            )));
        }
        Ok(())
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            isa: defaults::ISA.to_owned(),
            variant: String::new(),
            privilege: PrivilegeMode::Machine,
            endianness: Endianness::Little,
            memory: Self::default_memory(),
            harts: defaults::HARTS,
            triggers: defaults::TRIGGERS,
            pmp_regions: 0,
            misaligned: false,
            reset_vector: None,
            debug_module: DebugModuleConfig::default(),
        }
    }
}
