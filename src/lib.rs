//! diskplan library
//!
//! Resolves, validates, costs and emits the data-disk attachment plan of a
//! virtual machine before it is submitted to a provisioning API.

pub mod catalog;
pub mod cli;
pub mod config_file;
pub mod engine;
pub mod error;
pub mod planner;
pub mod types;

// Re-export main types for convenience
pub use catalog::disk_types::{DiskTypeCatalog, DiskTypeDescriptor, DiskTypeLookup};
pub use catalog::instance_limits::{
    core_count, is_premium_capable, InstanceLimitCatalog, InstanceLimitLookup, InstanceLimits,
};
pub use config_file::{DeviceOverride, DevicesConfiguration};
pub use error::DiskPlanError;
pub use planner::{DiskPlan, PlanReport};
pub use types::{CachingMode, DiskType, PerformanceTier, Workload};

pub use engine::cost::{CostBreakdown, CostEstimate};
pub use engine::performance::PerformanceProfile;
pub use engine::resolver::ResolvedDevice;
pub use engine::validator::{ValidationIssue, ValidationResult, ValidationRule};
