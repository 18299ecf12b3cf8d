//! Type-safe tags for data-disk plans
//!
//! Disk types, caching modes and workload kinds arrive as strings from
//! configuration files and the command line. They are parsed into these
//! closed enums at the boundary so the planning engine never sees an
//! unrecognized tag.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Storage account type of a managed data disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum DiskType {
    #[serde(rename = "Standard_LRS")]
    #[strum(serialize = "Standard_LRS")]
    StandardHdd,
    #[default]
    #[serde(rename = "StandardSSD_LRS")]
    #[strum(serialize = "StandardSSD_LRS")]
    StandardSsd,
    #[serde(rename = "StandardSSD_ZRS")]
    #[strum(serialize = "StandardSSD_ZRS")]
    StandardSsdZrs,
    #[serde(rename = "Premium_LRS")]
    #[strum(serialize = "Premium_LRS")]
    Premium,
    #[serde(rename = "Premium_ZRS")]
    #[strum(serialize = "Premium_ZRS")]
    PremiumZrs,
    #[serde(rename = "PremiumV2_LRS")]
    #[strum(serialize = "PremiumV2_LRS")]
    PremiumV2,
    #[serde(rename = "UltraSSD_LRS")]
    #[strum(serialize = "UltraSSD_LRS")]
    Ultra,
}

impl DiskType {
    /// Check if this type belongs to the Ultra performance tier
    pub fn is_ultra(&self) -> bool {
        matches!(self, Self::Ultra)
    }
}

/// Host-side cache policy applied to a data disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum CachingMode {
    #[strum(serialize = "None")]
    None,
    #[default]
    #[strum(serialize = "ReadOnly")]
    ReadOnly,
    #[strum(serialize = "ReadWrite")]
    ReadWrite,
}

/// Workload a set of data disks is intended for
///
/// Only used to seed starter configurations; the engine itself never
/// branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Workload {
    #[default]
    General,
    Database,
    Logs,
    Backup,
}

impl Workload {
    /// Recommended storage type for this workload
    pub fn recommended_disk_type(&self) -> DiskType {
        match self {
            Self::General | Self::Logs => DiskType::StandardSsd,
            Self::Database => DiskType::Premium,
            Self::Backup => DiskType::StandardHdd,
        }
    }

    /// Recommended host caching for this workload
    ///
    /// Write-heavy workloads (logs, backups) skip the host cache.
    pub fn recommended_caching(&self) -> CachingMode {
        match self {
            Self::General | Self::Database => CachingMode::ReadOnly,
            Self::Logs | Self::Backup => CachingMode::None,
        }
    }
}

/// Coarse performance class of a whole plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum PerformanceTier {
    #[default]
    Standard,
    Premium,
    Ultra,
}
