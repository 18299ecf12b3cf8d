//! Instance-limit provider
//!
//! Maps an instance-size identifier (e.g. `Standard_D4s_v3`) to the number
//! of data disks it can attach, and derives rough IOPS / throughput ceilings
//! from the core count embedded in the size name.
//!
//! # Heuristics
//!
//! | Derived value        | Rule |
//! |----------------------|------|
//! | cores                | first run of digits in the size name, default 2 |
//! | max IOPS             | cores * 2000 |
//! | max throughput MB/s  | cores * 50 |
//! | premium capable      | legacy token substring, else `s` suffix with optional `_v<N>` |
//!
//! These are textual approximations and are kept exactly as they are,
//! including for size names they get wrong.

use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Data-disk ceiling for sizes missing from the table
pub const DEFAULT_MAX_DATA_DISKS: u32 = 4;

/// Core count assumed when the size name carries no digits
pub const DEFAULT_CORE_COUNT: u64 = 2;

pub const IOPS_PER_CORE: u64 = 2000;
pub const THROUGHPUT_MBPS_PER_CORE: u64 = 50;

/// Legacy size-family tokens that always imply premium storage support
pub const PREMIUM_FAMILY_TOKENS: &[&str] = &["DS", "ES", "FS", "GS", "LS", "MS", "NV", "NC"];

const BUILTIN_MAX_DATA_DISKS: &[(&str, u32)] = &[
    ("Standard_B1s", 2),
    ("Standard_B1ms", 2),
    ("Standard_B2s", 4),
    ("Standard_B2ms", 4),
    ("Standard_B4ms", 8),
    ("Standard_B8ms", 16),
    ("Standard_D2_v3", 4),
    ("Standard_D4_v3", 8),
    ("Standard_D8_v3", 16),
    ("Standard_D16_v3", 32),
    ("Standard_D2s_v3", 4),
    ("Standard_D4s_v3", 8),
    ("Standard_D8s_v3", 16),
    ("Standard_D16s_v3", 32),
    ("Standard_D32s_v3", 32),
    ("Standard_D64s_v3", 32),
    ("Standard_D2s_v5", 4),
    ("Standard_D4s_v5", 8),
    ("Standard_D8s_v5", 16),
    ("Standard_D16s_v5", 32),
    ("Standard_D32s_v5", 32),
    ("Standard_DS1_v2", 4),
    ("Standard_DS2_v2", 8),
    ("Standard_DS3_v2", 16),
    ("Standard_DS4_v2", 32),
    ("Standard_E2s_v3", 4),
    ("Standard_E4s_v3", 8),
    ("Standard_E8s_v3", 16),
    ("Standard_E16s_v3", 32),
    ("Standard_E32s_v3", 32),
    ("Standard_F2s_v2", 4),
    ("Standard_F4s_v2", 8),
    ("Standard_F8s_v2", 16),
    ("Standard_F16s_v2", 32),
    ("Standard_L8s_v3", 16),
    ("Standard_L16s_v3", 32),
    ("Standard_M64s", 64),
    ("Standard_M128s", 64),
];

lazy_static! {
    static ref PREMIUM_SUFFIX: Regex =
        Regex::new(r"s(_v\d+)?$").expect("premium suffix pattern is valid");
    static ref FIRST_DIGITS: Regex = Regex::new(r"\d+").expect("digit pattern is valid");
    static ref BUILTIN_CATALOG: Arc<InstanceLimitCatalog> =
        Arc::new(InstanceLimitCatalog::default());
}

/// Capacity snapshot for one instance size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceLimits {
    pub instance_size: String,
    pub max_data_disk_count: u32,
    pub cores: u64,
    #[serde(rename = "maxIOPS")]
    pub max_iops: u64,
    #[serde(rename = "maxThroughputMBps")]
    pub max_throughput_mbps: u64,
}

/// Number of cores implied by an instance-size name.
///
/// Takes the first run of digits anywhere in the string, so
/// `Standard_D2s_v3` yields 2 and `Standard_M128ms` yields 128. A digit run
/// too long for `u64` saturates.
pub fn core_count(instance_size: &str) -> u64 {
    FIRST_DIGITS
        .find(instance_size)
        .map(|m| m.as_str().parse().unwrap_or(u64::MAX))
        .unwrap_or(DEFAULT_CORE_COUNT)
}

/// Whether an instance-size name looks premium-storage capable.
pub fn is_premium_capable(instance_size: &str) -> bool {
    if PREMIUM_FAMILY_TOKENS
        .iter()
        .any(|token| instance_size.contains(token))
    {
        return true;
    }
    PREMIUM_SUFFIX.is_match(instance_size)
}

/// Lookup service for instance-size limits.
///
/// Only the data-disk ceiling is table-driven; everything else is derived
/// from the size name by the provided methods.
pub trait InstanceLimitLookup: Send + Sync {
    /// Never fails; unknown sizes get [`DEFAULT_MAX_DATA_DISKS`].
    fn max_data_disk_count(&self, instance_size: &str) -> u32;

    fn limits(&self, instance_size: &str) -> InstanceLimits {
        let cores = core_count(instance_size);
        InstanceLimits {
            instance_size: instance_size.to_string(),
            max_data_disk_count: self.max_data_disk_count(instance_size),
            cores,
            max_iops: cores.saturating_mul(IOPS_PER_CORE),
            max_throughput_mbps: cores.saturating_mul(THROUGHPUT_MBPS_PER_CORE),
        }
    }

    fn supports_premium(&self, instance_size: &str) -> bool {
        is_premium_capable(instance_size)
    }
}

/// In-memory size → data-disk-count table
#[derive(Debug, Clone)]
pub struct InstanceLimitCatalog {
    max_data_disks: HashMap<String, u32>,
}

impl InstanceLimitCatalog {
    /// Shared instance of the built-in table
    pub fn builtin() -> Arc<InstanceLimitCatalog> {
        Arc::clone(&BUILTIN_CATALOG)
    }

    pub fn empty() -> Self {
        Self {
            max_data_disks: HashMap::new(),
        }
    }

    pub fn with_size(mut self, instance_size: impl Into<String>, max_data_disks: u32) -> Self {
        self.max_data_disks.insert(instance_size.into(), max_data_disks);
        self
    }

    pub fn contains(&self, instance_size: &str) -> bool {
        self.max_data_disks.contains_key(instance_size)
    }
}

impl Default for InstanceLimitCatalog {
    fn default() -> Self {
        Self {
            max_data_disks: BUILTIN_MAX_DATA_DISKS
                .iter()
                .map(|(size, count)| ((*size).to_string(), *count))
                .collect(),
        }
    }
}

impl InstanceLimitLookup for InstanceLimitCatalog {
    fn max_data_disk_count(&self, instance_size: &str) -> u32 {
        self.max_data_disks
            .get(instance_size)
            .copied()
            .unwrap_or(DEFAULT_MAX_DATA_DISKS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_size_limit() {
        let catalog = InstanceLimitCatalog::default();
        assert_eq!(catalog.max_data_disk_count("Standard_D2s_v3"), 4);
        assert_eq!(catalog.max_data_disk_count("Standard_E16s_v3"), 32);
    }

    #[test]
    fn test_unknown_size_defaults_to_four() {
        let catalog = InstanceLimitCatalog::default();
        assert_eq!(catalog.max_data_disk_count("Standard_Z99_v9"), 4);
        assert_eq!(catalog.max_data_disk_count(""), 4);
    }

    #[test]
    fn test_core_count_first_digit_run() {
        assert_eq!(core_count("Standard_D2s_v3"), 2);
        assert_eq!(core_count("Standard_D16s_v3"), 16);
        assert_eq!(core_count("Standard_M128ms"), 128);
        assert_eq!(core_count("custom"), 2);
    }

    #[test]
    fn test_core_count_long_digit_run_saturates() {
        assert_eq!(core_count("Standard_D99999999999s_v3"), 99_999_999_999);
        assert_eq!(core_count("Standard_D99999999999999999999999s_v3"), u64::MAX);

        let limits = InstanceLimitCatalog::empty().limits("Standard_D99999999999999999999999s_v3");
        assert_eq!(limits.max_iops, u64::MAX);
        assert_eq!(limits.max_throughput_mbps, u64::MAX);
    }

    #[test]
    fn test_derived_limits() {
        let limits = InstanceLimitCatalog::default().limits("Standard_D4s_v3");
        assert_eq!(limits.max_data_disk_count, 8);
        assert_eq!(limits.cores, 4);
        assert_eq!(limits.max_iops, 8000);
        assert_eq!(limits.max_throughput_mbps, 200);
    }

    #[test]
    fn test_premium_capable_suffix() {
        assert!(is_premium_capable("Standard_D2s_v3"));
        assert!(is_premium_capable("Standard_B2s"));
        assert!(is_premium_capable("Standard_E16s_v5"));
        assert!(!is_premium_capable("Standard_D2_v3"));
        assert!(!is_premium_capable("Standard_A2"));
        assert!(!is_premium_capable("Standard_D2s_v"));
    }

    #[test]
    fn test_premium_capable_legacy_tokens() {
        assert!(is_premium_capable("Standard_DS2_v2"));
        assert!(is_premium_capable("Standard_GS5"));
        assert!(is_premium_capable("Standard_NC6"));
        assert!(is_premium_capable("Standard_NV12"));
    }

    #[test]
    fn test_premium_check_is_case_sensitive() {
        assert!(!is_premium_capable("standard_d2_v3"));
        assert!(!is_premium_capable("Standard_D2S_V3"));
    }

    #[test]
    fn test_fabricated_table() {
        let catalog = InstanceLimitCatalog::empty().with_size("Tiny_1", 1);
        assert!(catalog.contains("Tiny_1"));
        assert_eq!(catalog.limits("Tiny_1").max_data_disk_count, 1);
        assert_eq!(catalog.max_data_disk_count("Standard_D2s_v3"), 4);
    }
}
