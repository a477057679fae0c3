//! # Machine Configuration Tests
//!
//! Covers default construction, JSON deserialization with partial input,
//! and validation of machine descriptions this model cannot build.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvdiff_core::common::MachineError;
use rvdiff_core::config::{Endianness, MachineConfig, MemoryRegion};
use rvdiff_core::core::arch::mode::PrivilegeMode;

// ══════════════════════════════════════════════════════════
// 1. Defaults and JSON parsing
// ══════════════════════════════════════════════════════════

#[test]
fn default_describes_the_standard_machine() {
    let config = MachineConfig::default();
    assert_eq!(config.isa, "RV32I");
    assert_eq!(config.variant, "");
    assert_eq!(config.privilege, PrivilegeMode::Machine);
    assert_eq!(config.endianness, Endianness::Little);
    assert_eq!(config.memory.len(), 1);
    assert_eq!(config.memory[0].base, 0x8000_0000);
    assert_eq!(config.memory[0].size, 128 * 1024 * 1024);
    assert_eq!(config.harts, 1);
    assert_eq!(config.triggers, 4);
    assert_eq!(config.pmp_regions, 0);
    assert!(!config.misaligned);
    assert_eq!(config.reset_vector, None);
    config.validate().unwrap();
}

#[test]
fn empty_json_matches_the_defaults() {
    let config: MachineConfig = serde_json::from_str("{}").unwrap();
    let default = MachineConfig::default();
    assert_eq!(config.isa, default.isa);
    assert_eq!(config.harts, default.harts);
    assert_eq!(config.memory[0].base, default.memory[0].base);
    assert_eq!(config.memory[0].size, default.memory[0].size);
    assert_eq!(config.privilege, default.privilege);
    assert_eq!(config.endianness, default.endianness);
    assert_eq!(config.reset_vector, default.reset_vector);
    config.validate().unwrap();
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let json = r#"{ "misaligned": true, "reset_vector": 2147483652 }"#;
    let config: MachineConfig = serde_json::from_str(json).unwrap();
    assert!(config.misaligned);
    assert_eq!(config.reset_vector, Some(0x8000_0004));
    assert_eq!(config.isa, "RV32I");
    assert_eq!(config.harts, 1);
    config.validate().unwrap();
}

#[rstest]
#[case("little", Endianness::Little)]
#[case("le", Endianness::Little)]
#[case("big", Endianness::Big)]
#[case("be", Endianness::Big)]
fn endianness_accepts_short_and_long_names(#[case] text: &str, #[case] expected: Endianness) {
    let json = format!(r#"{{ "endianness": "{text}" }}"#);
    let config: MachineConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config.endianness, expected);
}

#[test]
fn debug_module_fields_default_individually() {
    let config = MachineConfig::default();
    assert_eq!(config.debug_module.progbuf_words, 2);
    assert_eq!(config.debug_module.sba_data_width, 0);
    assert!(!config.debug_module.require_authentication);
    assert!(config.debug_module.abstract_csr_access);
    assert!(config.debug_module.abstract_fpr_access);
    assert!(config.debug_module.support_haltgroups);
    assert!(config.debug_module.support_impebreak);

    let json = r#"{ "debug_module": { "progbuf_words": 16 } }"#;
    let config: MachineConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.debug_module.progbuf_words, 16);
    assert!(config.debug_module.support_impebreak);
}

// ══════════════════════════════════════════════════════════
// 2. Boot PC selection
// ══════════════════════════════════════════════════════════

#[test]
fn boot_pc_falls_back_to_region_zero_base() {
    let config = MachineConfig {
        memory: vec![MemoryRegion {
            base: 0x4000_0000,
            size: 4096,
        }],
        ..MachineConfig::default()
    };
    assert_eq!(config.boot_pc(), 0x4000_0000);
}

#[test]
fn boot_pc_prefers_the_reset_vector() {
    let config = MachineConfig {
        reset_vector: Some(0x8000_2000),
        ..MachineConfig::default()
    };
    assert_eq!(config.boot_pc(), 0x8000_2000);
}

#[test]
fn main_memory_is_region_zero() {
    let config = MachineConfig::default();
    let region = config.main_memory().unwrap();
    assert_eq!(region.base, 0x8000_0000);
}

// ══════════════════════════════════════════════════════════
// 3. Validation rejections
// ══════════════════════════════════════════════════════════

fn invalid_message(config: &MachineConfig) -> String {
    match config.validate().unwrap_err() {
        MachineError::InvalidConfig(msg) => msg,
        other => panic!("expected InvalidConfig, got: {other}"),
    }
}

#[test]
fn rejects_unsupported_isa() {
    let config = MachineConfig {
        isa: "RV64I".to_owned(),
        ..MachineConfig::default()
    };
    assert!(invalid_message(&config).contains("isa"));
}

#[test]
fn rejects_big_endian() {
    let config = MachineConfig {
        endianness: Endianness::Big,
        ..MachineConfig::default()
    };
    assert!(invalid_message(&config).contains("big-endian"));
}

#[test]
fn rejects_multiple_harts() {
    let config = MachineConfig {
        harts: 2,
        ..MachineConfig::default()
    };
    assert!(invalid_message(&config).contains("hart"));
}

#[test]
fn rejects_pmp_regions() {
    let config = MachineConfig {
        pmp_regions: 4,
        ..MachineConfig::default()
    };
    assert!(invalid_message(&config).contains("protection"));
}

#[test]
fn rejects_an_empty_memory_map() {
    let config = MachineConfig {
        memory: vec![],
        ..MachineConfig::default()
    };
    assert!(invalid_message(&config).contains("memory region"));
}

#[test]
fn rejects_a_zero_size_region() {
    let config = MachineConfig {
        memory: vec![MemoryRegion {
            base: 0x8000_0000,
            size: 0,
        }],
        ..MachineConfig::default()
    };
    assert!(invalid_message(&config).contains("zero size"));
}

#[test]
fn rejects_a_region_overflowing_the_address_space() {
    let config = MachineConfig {
        memory: vec![MemoryRegion {
            base: u64::MAX,
            size: 2,
        }],
        reset_vector: Some(0x8000_0000),
        ..MachineConfig::default()
    };
    assert!(invalid_message(&config).contains("overflows"));
}

#[test]
fn rejects_a_region_past_the_32_bit_space() {
    let config = MachineConfig {
        memory: vec![MemoryRegion {
            base: 0xFFFF_0000,
            size: 0x2_0000,
        }],
        reset_vector: Some(0xFFFF_0000),
        ..MachineConfig::default()
    };
    assert!(invalid_message(&config).contains("32-bit"));
}

#[test]
fn rejects_a_reset_vector_outside_the_address_space() {
    let config = MachineConfig {
        reset_vector: Some(0x1_0000_0000),
        ..MachineConfig::default()
    };
    assert!(invalid_message(&config).contains("outside"));
}

#[test]
fn rejects_a_misaligned_reset_vector() {
    let config = MachineConfig {
        reset_vector: Some(0x8000_0002),
        ..MachineConfig::default()
    };
    assert!(invalid_message(&config).contains("aligned"));
}
