//! Validator
//!
//! Runs a fixed pipeline of rules over a configuration. Every rule runs on
//! every call, so the report is complete and deterministic. Errors make a
//! plan invalid; warnings never do.
//!
//! | Rule                   | Severity | Trigger |
//! |------------------------|----------|---------|
//! | device-count           | error    | count above the size's data-disk limit |
//! | default-size           | error    | default size outside 4..=32767 GB |
//! | lun-start              | error    | lunStart outside 0..=63 |
//! | override-index         | error    | override matchIndex outside `[0, count)` |
//! | override-size          | error    | override size outside 4..=32767 GB |
//! | override-lun           | error    | override LUN outside 0..=63 |
//! | duplicate-lun          | error    | the same LUN at two indices |
//! | iops-capacity          | warning  | aggregate IOPS above the size's ceiling |
//! | throughput-capacity    | warning  | aggregate MB/s above the size's ceiling |
//! | premium-compatibility  | error    | premium-tier disk on a non-premium size |
//! | boot-time              | warning  | more than 16 disks |
//! | no-disks               | warning  | zero disks |

use serde::Serialize;
use std::fmt;
use strum::Display;
use tracing::{debug, info, warn};

use crate::catalog::disk_types::DiskTypeLookup;
use crate::catalog::instance_limits::{InstanceLimitLookup, InstanceLimits};
use crate::config_file::DevicesConfiguration;
use crate::engine::lun::{assigned_luns, duplicate_luns, is_valid_lun, MAX_LUN};
use crate::engine::performance::aggregate;
use crate::engine::resolver::resolve_all;
use crate::types::DiskType;

pub const MIN_DISK_SIZE_GB: u32 = 4;
pub const MAX_DISK_SIZE_GB: u32 = 32_767;

/// Above this many disks, boot time is at risk
pub const BOOT_TIME_DISK_THRESHOLD: i64 = 16;

/// Rule that produced a [`ValidationIssue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ValidationRule {
    DeviceCount,
    DefaultSize,
    LunStart,
    OverrideIndex,
    OverrideSize,
    OverrideLun,
    DuplicateLun,
    IopsCapacity,
    ThroughputCapacity,
    PremiumCompatibility,
    BootTime,
    NoDisks,
}

/// One error or warning
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub rule: ValidationRule,
    pub message: String,
    /// Device index the issue is tied to, for per-override checks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
}

impl ValidationIssue {
    fn new(rule: ValidationRule, message: String) -> Self {
        Self {
            rule,
            message,
            index: None,
        }
    }

    fn at(rule: ValidationRule, index: i64, message: String) -> Self {
        Self {
            rule,
            message,
            index: Some(index),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Totals computed while validating
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedTotals {
    pub device_count: i64,
    #[serde(rename = "totalCapacityGB")]
    pub total_capacity_gb: u64,
    #[serde(rename = "totalIOPS")]
    pub total_iops: u64,
    #[serde(rename = "totalThroughputMBps")]
    pub total_throughput_mbps: u64,
}

/// Outcome of validating a configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub limits: InstanceLimits,
    pub totals: CalculatedTotals,
}

impl ValidationResult {
    /// Error messages only
    pub fn error_messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    /// Warning messages only
    pub fn warning_messages(&self) -> Vec<&str> {
        self.warnings.iter().map(|w| w.message.as_str()).collect()
    }

    pub fn has_rule(&self, rule: ValidationRule) -> bool {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .any(|issue| issue.rule == rule)
    }

    /// Returns a summary of the result for logging/display.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!(
                "Validation: {}",
                if self.valid { "valid" } else { "INVALID" }
            ),
            format!(
                "  Size: {} (max {} disks, {} IOPS, {} MB/s)",
                self.limits.instance_size,
                self.limits.max_data_disk_count,
                self.limits.max_iops,
                self.limits.max_throughput_mbps
            ),
            format!(
                "  Disks: {} ({} GB, {} IOPS, {} MB/s)",
                self.totals.device_count,
                self.totals.total_capacity_gb,
                self.totals.total_iops,
                self.totals.total_throughput_mbps
            ),
        ];
        for error in &self.errors {
            lines.push(format!("  error [{}]: {}", error.rule, error.message));
        }
        for warning in &self.warnings {
            lines.push(format!("  warning [{}]: {}", warning.rule, warning.message));
        }
        lines.join("\n")
    }
}

fn size_in_range(size_gb: u32) -> bool {
    (MIN_DISK_SIZE_GB..=MAX_DISK_SIZE_GB).contains(&size_gb)
}

/// Validate a configuration against its instance size.
///
/// Never fails and never stops early: all rules contribute to the result.
pub fn validate(
    config: &DevicesConfiguration,
    disk_types: &dyn DiskTypeLookup,
    instance_limits: &dyn InstanceLimitLookup,
) -> ValidationResult {
    let limits = instance_limits.limits(&config.instance_size);
    let devices = resolve_all(config);
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Device count ceiling
    if config.device_count > i64::from(limits.max_data_disk_count) {
        errors.push(ValidationIssue::new(
            ValidationRule::DeviceCount,
            format!(
                "Data disk count {} exceeds VM limit of {} for size {}",
                config.device_count, limits.max_data_disk_count, config.instance_size
            ),
        ));
    }

    // Shared defaults
    if !size_in_range(config.size_gb) {
        errors.push(ValidationIssue::new(
            ValidationRule::DefaultSize,
            format!(
                "Default disk size {} GB is outside the supported range {}-{} GB",
                config.size_gb, MIN_DISK_SIZE_GB, MAX_DISK_SIZE_GB
            ),
        ));
    }
    if !is_valid_lun(config.lun_start) {
        errors.push(ValidationIssue::new(
            ValidationRule::LunStart,
            format!(
                "LUN start {} is outside the valid range 0-{}",
                config.lun_start, MAX_LUN
            ),
        ));
    }

    // Per-override checks
    for device_override in &config.overrides {
        let index = device_override.match_index;
        if index < 0 || index >= config.device_count {
            errors.push(ValidationIssue::at(
                ValidationRule::OverrideIndex,
                index,
                format!(
                    "Override matchIndex {} is out of range (device count is {})",
                    index, config.device_count
                ),
            ));
        }
        if let Some(size_gb) = device_override.size_gb {
            if !size_in_range(size_gb) {
                errors.push(ValidationIssue::at(
                    ValidationRule::OverrideSize,
                    index,
                    format!(
                        "Disk {}: size {} GB is outside the supported range {}-{} GB",
                        index, size_gb, MIN_DISK_SIZE_GB, MAX_DISK_SIZE_GB
                    ),
                ));
            }
        }
        if let Some(lun) = device_override.lun {
            if !is_valid_lun(lun) {
                errors.push(ValidationIssue::at(
                    ValidationRule::OverrideLun,
                    index,
                    format!("Disk {}: LUN {} is outside the valid range 0-{}", index, lun, MAX_LUN),
                ));
            }
        }
    }

    // LUN uniqueness
    let duplicates = duplicate_luns(&assigned_luns(config));
    if !duplicates.is_empty() {
        let values: Vec<String> = duplicates.iter().map(|lun| lun.to_string()).collect();
        errors.push(ValidationIssue::new(
            ValidationRule::DuplicateLun,
            format!("Duplicate LUN values detected: {}", values.join(", ")),
        ));
    }

    // Capacity against the size's ceilings
    let (total_iops, total_throughput_mbps) = aggregate(&devices, disk_types);
    if total_iops > limits.max_iops {
        warnings.push(ValidationIssue::new(
            ValidationRule::IopsCapacity,
            format!(
                "Aggregate disk IOPS {} exceeds VM limit of {} IOPS for size {}; disks will be throttled",
                total_iops, limits.max_iops, config.instance_size
            ),
        ));
    }
    if total_throughput_mbps > limits.max_throughput_mbps {
        warnings.push(ValidationIssue::new(
            ValidationRule::ThroughputCapacity,
            format!(
                "Aggregate disk throughput {} MB/s exceeds VM limit of {} MB/s for size {}; disks will be throttled",
                total_throughput_mbps, limits.max_throughput_mbps, config.instance_size
            ),
        ));
    }

    // Premium-tier disks need a premium-capable size
    let premium_types = premium_types_requested(config, disk_types);
    if !premium_types.is_empty() && !instance_limits.supports_premium(&config.instance_size) {
        let names: Vec<String> = premium_types.iter().map(|t| t.to_string()).collect();
        errors.push(ValidationIssue::new(
            ValidationRule::PremiumCompatibility,
            format!(
                "Premium storage ({}) is not supported by VM size {}; choose a premium-capable size (e.g. an 's' variant)",
                names.join(", "),
                config.instance_size
            ),
        ));
    }

    // Advisories
    if config.device_count > BOOT_TIME_DISK_THRESHOLD {
        warnings.push(ValidationIssue::new(
            ValidationRule::BootTime,
            format!(
                "{} data disks may noticeably slow VM boot; consider fewer, larger disks",
                config.device_count
            ),
        ));
    }
    if config.device_count == 0 {
        warnings.push(ValidationIssue::new(
            ValidationRule::NoDisks,
            "No data disks configured (0 disks); application data will share the OS disk"
                .to_string(),
        ));
    }

    let totals = CalculatedTotals {
        device_count: config.device_count,
        total_capacity_gb: devices.iter().map(|d| u64::from(d.size_gb)).sum(),
        total_iops,
        total_throughput_mbps,
    };

    for error in &errors {
        debug!("Validation error [{}]: {}", error.rule, error.message);
    }
    for warning in &warnings {
        warn!("Validation warning [{}]: {}", warning.rule, warning.message);
    }
    info!(
        "Validated {} data disk(s) for {}: {} error(s), {} warning(s)",
        config.device_count,
        config.instance_name,
        errors.len(),
        warnings.len()
    );

    ValidationResult {
        valid: errors.is_empty(),
        errors,
        warnings,
        limits,
        totals,
    }
}

/// Premium-tier types named by the defaults or by any override, first-seen order
fn premium_types_requested(
    config: &DevicesConfiguration,
    disk_types: &dyn DiskTypeLookup,
) -> Vec<DiskType> {
    let mut found = Vec::new();
    let candidates = std::iter::once(config.disk_type)
        .chain(config.overrides.iter().filter_map(|o| o.disk_type));
    for disk_type in candidates {
        if disk_types.is_premium_tier(disk_type) && !found.contains(&disk_type) {
            found.push(disk_type);
        }
    }
    found
}
