//! Performance model
//!
//! Per-disk IOPS and throughput scale linearly with provisioned size and
//! are capped per disk. Plan totals are plain sums of the per-disk values.

use serde::Serialize;
use tracing::debug;

use crate::catalog::disk_types::{DiskTypeDescriptor, DiskTypeLookup};
use crate::config_file::DevicesConfiguration;
use crate::engine::resolver::{resolve_all, ResolvedDevice};
use crate::types::PerformanceTier;

/// Per-disk IOPS ceiling
pub const MAX_DISK_IOPS: u64 = 20_000;

/// Per-disk throughput ceiling, MB/s
pub const MAX_DISK_THROUGHPUT_MBPS: u64 = 900;

/// Estimated performance of a whole plan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceProfile {
    #[serde(rename = "totalIOPS")]
    pub total_iops: u64,
    #[serde(rename = "totalThroughputMBps")]
    pub total_throughput_mbps: u64,
    #[serde(rename = "perDiskIOPS")]
    pub per_disk_iops: Vec<u64>,
    #[serde(rename = "perDiskThroughputMBps")]
    pub per_disk_throughput_mbps: Vec<u64>,
    pub performance_tier: PerformanceTier,
}

/// `floor(size * factor)`, capped
fn scaled(size_gb: u32, factor: f64, cap: u64) -> u64 {
    let raw = (f64::from(size_gb) * factor).floor();
    if raw <= 0.0 {
        0
    } else {
        (raw as u64).min(cap)
    }
}

pub fn disk_iops(size_gb: u32, descriptor: &DiskTypeDescriptor) -> u64 {
    scaled(size_gb, descriptor.iops_per_gb, MAX_DISK_IOPS)
}

pub fn disk_throughput_mbps(size_gb: u32, descriptor: &DiskTypeDescriptor) -> u64 {
    scaled(size_gb, descriptor.throughput_per_gb, MAX_DISK_THROUGHPUT_MBPS)
}

/// Aggregate IOPS and throughput of already-resolved devices
pub fn aggregate(devices: &[ResolvedDevice], disk_types: &dyn DiskTypeLookup) -> (u64, u64) {
    devices.iter().fold((0, 0), |(iops, throughput), device| {
        let descriptor = disk_types.describe(device.disk_type);
        (
            iops + disk_iops(device.size_gb, &descriptor),
            throughput + disk_throughput_mbps(device.size_gb, &descriptor),
        )
    })
}

/// Classify a plan as Ultra, Premium or Standard.
///
/// Looks at the default type first, then at the type of every override,
/// independently of how many devices are planned.
pub fn classify_tier(
    config: &DevicesConfiguration,
    disk_types: &dyn DiskTypeLookup,
) -> PerformanceTier {
    let override_types = || config.overrides.iter().filter_map(|o| o.disk_type);

    if config.disk_type.is_ultra() || override_types().any(|t| t.is_ultra()) {
        PerformanceTier::Ultra
    } else if disk_types.is_premium_tier(config.disk_type)
        || override_types().any(|t| disk_types.is_premium_tier(t))
    {
        PerformanceTier::Premium
    } else {
        PerformanceTier::Standard
    }
}

/// Estimate per-disk and aggregate performance.
///
/// Runs on any configuration, valid or not.
pub fn estimate_performance(
    config: &DevicesConfiguration,
    disk_types: &dyn DiskTypeLookup,
) -> PerformanceProfile {
    let devices = resolve_all(config);

    let mut per_disk_iops = Vec::with_capacity(devices.len());
    let mut per_disk_throughput_mbps = Vec::with_capacity(devices.len());
    for device in &devices {
        let descriptor = disk_types.describe(device.disk_type);
        per_disk_iops.push(disk_iops(device.size_gb, &descriptor));
        per_disk_throughput_mbps.push(disk_throughput_mbps(device.size_gb, &descriptor));
    }

    let profile = PerformanceProfile {
        total_iops: per_disk_iops.iter().sum(),
        total_throughput_mbps: per_disk_throughput_mbps.iter().sum(),
        per_disk_iops,
        per_disk_throughput_mbps,
        performance_tier: classify_tier(config, disk_types),
    };

    debug!(
        "Performance estimate for {}: {} IOPS, {} MB/s, tier {}",
        config.instance_name,
        profile.total_iops,
        profile.total_throughput_mbps,
        profile.performance_tier
    );

    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::disk_types::DiskTypeCatalog;
    use crate::config_file::DeviceOverride;
    use crate::types::{CachingMode, DiskType};

    fn config(count: i64, size_gb: u32, disk_type: DiskType) -> DevicesConfiguration {
        DevicesConfiguration::new(
            "vm1",
            "rg1",
            "Standard_D8s_v3",
            count,
            size_gb,
            disk_type,
            CachingMode::ReadOnly,
        )
    }

    #[test]
    fn test_premium_per_disk_numbers() {
        let profile = estimate_performance(&config(3, 512, DiskType::Premium), &DiskTypeCatalog::default());
        assert_eq!(profile.per_disk_iops, vec![2560, 2560, 2560]);
        assert_eq!(profile.per_disk_throughput_mbps, vec![102, 102, 102]);
        assert_eq!(profile.total_iops, 7680);
        assert_eq!(profile.total_throughput_mbps, 306);
        assert_eq!(profile.performance_tier, PerformanceTier::Premium);
    }

    #[test]
    fn test_per_disk_caps() {
        let profile = estimate_performance(&config(1, 32767, DiskType::Ultra), &DiskTypeCatalog::default());
        assert_eq!(profile.per_disk_iops, vec![MAX_DISK_IOPS]);
        assert_eq!(profile.per_disk_throughput_mbps, vec![MAX_DISK_THROUGHPUT_MBPS]);
    }

    #[test]
    fn test_zero_devices() {
        let profile = estimate_performance(&config(0, 512, DiskType::Premium), &DiskTypeCatalog::default());
        assert_eq!(profile.total_iops, 0);
        assert_eq!(profile.total_throughput_mbps, 0);
        assert!(profile.per_disk_iops.is_empty());
        assert!(profile.per_disk_throughput_mbps.is_empty());
    }

    #[test]
    fn test_overrides_change_per_disk_values() {
        let config = config(2, 100, DiskType::StandardHdd)
            .with_override(DeviceOverride::at(1).size_gb(1000).disk_type(DiskType::Premium));
        let profile = estimate_performance(&config, &DiskTypeCatalog::default());
        assert_eq!(profile.per_disk_iops, vec![50, 5000]);
        assert_eq!(profile.total_iops, 5050);
    }

    #[test]
    fn test_missing_type_uses_standard_ssd_factors() {
        let profile = estimate_performance(&config(1, 100, DiskType::Premium), &DiskTypeCatalog::empty());
        assert_eq!(profile.per_disk_iops, vec![200]);
        assert_eq!(profile.per_disk_throughput_mbps, vec![10]);
        // Fallback is not premium tier
        assert_eq!(profile.performance_tier, PerformanceTier::Standard);
    }

    #[test]
    fn test_tier_ultra_from_override() {
        let config = config(2, 128, DiskType::StandardSsd)
            .with_override(DeviceOverride::at(1).disk_type(DiskType::Ultra));
        assert_eq!(classify_tier(&config, &DiskTypeCatalog::default()), PerformanceTier::Ultra);
    }

    #[test]
    fn test_tier_standard() {
        let config = config(2, 128, DiskType::StandardHdd);
        assert_eq!(classify_tier(&config, &DiskTypeCatalog::default()), PerformanceTier::Standard);
    }

    #[test]
    fn test_aggregate_matches_profile_totals() {
        let config = config(4, 300, DiskType::PremiumV2)
            .with_override(DeviceOverride::at(2).size_gb(4000));
        let catalog = DiskTypeCatalog::default();
        let profile = estimate_performance(&config, &catalog);
        let (iops, throughput) = aggregate(&resolve_all(&config), &catalog);
        assert_eq!(iops, profile.total_iops);
        assert_eq!(throughput, profile.total_throughput_mbps);
    }
}
