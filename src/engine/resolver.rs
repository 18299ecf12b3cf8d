//! Device resolver
//!
//! Overlays the sparse per-device overrides onto the shared defaults to
//! produce one concrete [`ResolvedDevice`] per index.
//!
//! | Field   | Resolved from |
//! |---------|---------------|
//! | size    | `override.sizeGB` else default `sizeGB` |
//! | type    | `override.type` else default `type` |
//! | caching | `override.caching` else default `caching` |
//! | lun     | `override.lun` else `lunStart + index` |
//! | name    | `override.name` else `{instanceName}-datadisk{index}` |
//!
//! When several overrides share a `matchIndex`, the first one wins.

use serde::Serialize;
use std::collections::HashMap;

use crate::config_file::{DeviceOverride, DevicesConfiguration};
use crate::types::{CachingMode, DiskType};

/// Concrete description of the device at one index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDevice {
    pub index: usize,
    pub name: String,
    #[serde(rename = "sizeGB")]
    pub size_gb: u32,
    #[serde(rename = "type")]
    pub disk_type: DiskType,
    pub caching: CachingMode,
    pub lun: i64,
}

/// Default name of the device at `index`
pub fn default_device_name(instance_name: &str, index: usize) -> String {
    format!("{}-datadisk{}", instance_name, index)
}

/// Find the override targeting `index`, if any
pub fn find_override(config: &DevicesConfiguration, index: usize) -> Option<&DeviceOverride> {
    let index = i64::try_from(index).ok()?;
    config.overrides.iter().find(|o| o.match_index == index)
}

/// Resolve the device at `index`.
///
/// Never fails. An index with no override gets every default.
pub fn resolve_device(config: &DevicesConfiguration, index: usize) -> ResolvedDevice {
    overlay(config, index, find_override(config, index))
}

/// Resolve every device in `[0, deviceCount)`, in index order.
pub fn resolve_all(config: &DevicesConfiguration) -> Vec<ResolvedDevice> {
    let mut by_index: HashMap<i64, &DeviceOverride> = HashMap::new();
    for device_override in &config.overrides {
        by_index
            .entry(device_override.match_index)
            .or_insert(device_override);
    }

    (0..config.planned_count())
        .map(|index| {
            let found = i64::try_from(index)
                .ok()
                .and_then(|key| by_index.get(&key).copied());
            overlay(config, index, found)
        })
        .collect()
}

fn overlay(
    config: &DevicesConfiguration,
    index: usize,
    device_override: Option<&DeviceOverride>,
) -> ResolvedDevice {
    let default_lun = config.lun_start.saturating_add(index as i64);

    match device_override {
        Some(o) => ResolvedDevice {
            index,
            name: o
                .name
                .clone()
                .unwrap_or_else(|| default_device_name(&config.instance_name, index)),
            size_gb: o.size_gb.unwrap_or(config.size_gb),
            disk_type: o.disk_type.unwrap_or(config.disk_type),
            caching: o.caching.unwrap_or(config.caching),
            lun: o.lun.unwrap_or(default_lun),
        },
        None => ResolvedDevice {
            index,
            name: default_device_name(&config.instance_name, index),
            size_gb: config.size_gb,
            disk_type: config.disk_type,
            caching: config.caching,
            lun: default_lun,
        },
    }
}
