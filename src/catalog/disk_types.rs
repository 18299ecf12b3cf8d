//! Disk-type registry
//!
//! Maps a storage account type to its pricing and performance factors.
//! The numbers are illustrative approximations used for planning, not
//! authoritative provider pricing.

use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::types::DiskType;

/// Pricing and performance facts about one storage tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskTypeDescriptor {
    /// Monthly price per provisioned GB, in USD
    pub price_per_gb_month: f64,
    /// Provisioned IOPS per GB
    pub iops_per_gb: f64,
    /// Provisioned throughput (MB/s) per GB
    pub throughput_per_gb: f64,
    /// Whether the tier requires a premium-capable instance size
    pub is_premium_tier: bool,
}

impl DiskTypeDescriptor {
    pub const fn new(
        price_per_gb_month: f64,
        iops_per_gb: f64,
        throughput_per_gb: f64,
        is_premium_tier: bool,
    ) -> Self {
        Self {
            price_per_gb_month,
            iops_per_gb,
            throughput_per_gb,
            is_premium_tier,
        }
    }
}

/// Factors used whenever a table has no entry for the requested type.
pub const STANDARD_SSD_FALLBACK: DiskTypeDescriptor = DiskTypeDescriptor::new(0.075, 2.0, 0.1, false);

/// Built-in table: (type, price/GB/month, IOPS/GB, MBps/GB, premium tier)
const BUILTIN_DISK_TYPES: &[(DiskType, DiskTypeDescriptor)] = &[
    (DiskType::StandardHdd, DiskTypeDescriptor::new(0.04, 0.5, 0.06, false)),
    (DiskType::StandardSsd, STANDARD_SSD_FALLBACK),
    (DiskType::StandardSsdZrs, DiskTypeDescriptor::new(0.09, 2.0, 0.1, false)),
    (DiskType::Premium, DiskTypeDescriptor::new(0.135, 5.0, 0.2, true)),
    (DiskType::PremiumZrs, DiskTypeDescriptor::new(0.17, 5.0, 0.2, true)),
    (DiskType::PremiumV2, DiskTypeDescriptor::new(0.12, 6.0, 0.25, true)),
    (DiskType::Ultra, DiskTypeDescriptor::new(0.16, 10.0, 0.5, true)),
];

lazy_static! {
    static ref BUILTIN_CATALOG: Arc<DiskTypeCatalog> = Arc::new(DiskTypeCatalog::default());
}

/// Lookup service for disk-type facts.
///
/// Implementations must never fail: a type the table does not know about
/// resolves to [`STANDARD_SSD_FALLBACK`].
pub trait DiskTypeLookup: Send + Sync {
    fn describe(&self, disk_type: DiskType) -> DiskTypeDescriptor;

    fn is_premium_tier(&self, disk_type: DiskType) -> bool {
        self.describe(disk_type).is_premium_tier
    }
}

/// In-memory disk-type table
#[derive(Debug, Clone)]
pub struct DiskTypeCatalog {
    entries: HashMap<DiskType, DiskTypeDescriptor>,
}

impl DiskTypeCatalog {
    /// Shared instance of the built-in table
    pub fn builtin() -> Arc<DiskTypeCatalog> {
        Arc::clone(&BUILTIN_CATALOG)
    }

    /// A table with no entries; every lookup hits the fallback
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add or replace one entry
    pub fn with_entry(mut self, disk_type: DiskType, descriptor: DiskTypeDescriptor) -> Self {
        self.entries.insert(disk_type, descriptor);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DiskTypeCatalog {
    fn default() -> Self {
        Self {
            entries: BUILTIN_DISK_TYPES.iter().copied().collect(),
        }
    }
}

impl DiskTypeLookup for DiskTypeCatalog {
    fn describe(&self, disk_type: DiskType) -> DiskTypeDescriptor {
        self.entries
            .get(&disk_type)
            .copied()
            .unwrap_or(STANDARD_SSD_FALLBACK)
    }
}
