//! Data-disk configuration values and their JSON files.
//!
//! A [`DevicesConfiguration`] is built once (from code or a file) and never
//! mutated afterwards. Building one never fails on out-of-range values;
//! those are reported by the validator instead.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::types::{CachingMode, DiskType, Workload};

/// Region used when a configuration does not name one
pub const DEFAULT_LOCATION: &str = "eastus";

/// Default size of a workload starter configuration, in GB
pub const STARTER_DISK_SIZE_GB: u32 = 128;

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

/// Sparse patch applied to the device at `match_index`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeviceOverride {
    /// 0-based device index this override targets
    pub match_index: i64,
    #[serde(default, rename = "sizeGB", skip_serializing_if = "Option::is_none")]
    pub size_gb: Option<u32>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub disk_type: Option<DiskType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caching: Option<CachingMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lun: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl DeviceOverride {
    /// An override for `match_index` that changes nothing yet
    pub fn at(match_index: i64) -> Self {
        Self {
            match_index,
            ..Self::default()
        }
    }

    pub fn size_gb(mut self, size_gb: u32) -> Self {
        self.size_gb = Some(size_gb);
        self
    }

    pub fn disk_type(mut self, disk_type: DiskType) -> Self {
        self.disk_type = Some(disk_type);
        self
    }

    pub fn caching(mut self, caching: CachingMode) -> Self {
        self.caching = Some(caching);
        self
    }

    pub fn lun(mut self, lun: i64) -> Self {
        self.lun = Some(lun);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Root request: the data disks to attach to one virtual machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DevicesConfiguration {
    pub instance_name: String,
    pub resource_group: String,
    pub instance_size: String,
    #[serde(default = "default_location")]
    pub location: String,

    // Signed on purpose: a negative count is accepted and plans zero disks.
    pub device_count: i64,

    // Shared defaults for every device
    #[serde(rename = "sizeGB")]
    pub size_gb: u32,
    #[serde(rename = "type")]
    pub disk_type: DiskType,
    pub caching: CachingMode,
    #[serde(default)]
    pub lun_start: i64,

    #[serde(default)]
    pub overrides: Vec<DeviceOverride>,
}

impl DevicesConfiguration {
    /// Create a configuration with the default location and `lun_start = 0`
    pub fn new(
        instance_name: impl Into<String>,
        resource_group: impl Into<String>,
        instance_size: impl Into<String>,
        device_count: i64,
        size_gb: u32,
        disk_type: DiskType,
        caching: CachingMode,
    ) -> Self {
        Self {
            instance_name: instance_name.into(),
            resource_group: resource_group.into(),
            instance_size: instance_size.into(),
            location: default_location(),
            device_count,
            size_gb,
            disk_type,
            caching,
            lun_start: 0,
            overrides: Vec::new(),
        }
    }

    /// Starter configuration seeded from a workload's recommendations
    pub fn for_workload(
        instance_name: impl Into<String>,
        resource_group: impl Into<String>,
        instance_size: impl Into<String>,
        device_count: i64,
        workload: Workload,
    ) -> Self {
        Self::new(
            instance_name,
            resource_group,
            instance_size,
            device_count,
            STARTER_DISK_SIZE_GB,
            workload.recommended_disk_type(),
            workload.recommended_caching(),
        )
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_lun_start(mut self, lun_start: i64) -> Self {
        self.lun_start = lun_start;
        self
    }

    pub fn with_override(mut self, device_override: DeviceOverride) -> Self {
        self.overrides.push(device_override);
        self
    }

    /// Number of devices actually planned; negative counts plan none
    pub fn planned_count(&self) -> usize {
        usize::try_from(self.device_count).unwrap_or(0)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }
}
