//! Data-disk planner
//!
//! [`DiskPlan`] ties one immutable configuration to the two lookup tables
//! and exposes every engine operation. Each call recomputes its result from
//! scratch, so a plan can be shared across threads and queried repeatedly.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::catalog::disk_types::{DiskTypeCatalog, DiskTypeLookup};
use crate::catalog::instance_limits::{InstanceLimitCatalog, InstanceLimitLookup, InstanceLimits};
use crate::config_file::DevicesConfiguration;
use crate::engine::cost::{estimate_cost, CostEstimate};
use crate::engine::lun::assigned_luns;
use crate::engine::performance::{estimate_performance, PerformanceProfile};
use crate::engine::resolver::{resolve_all, resolve_device, ResolvedDevice};
use crate::engine::template::{emit_device_fragment, emit_parameters, emit_storage_profile};
use crate::engine::validator::{validate, ValidationResult};

/// Validation, performance and cost in one document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport {
    pub validation: ValidationResult,
    pub performance: PerformanceProfile,
    pub cost: CostEstimate,
}

/// A data-disk configuration bound to its lookup tables
#[derive(Clone)]
pub struct DiskPlan {
    config: DevicesConfiguration,
    disk_types: Arc<dyn DiskTypeLookup>,
    instance_limits: Arc<dyn InstanceLimitLookup>,
}

impl std::fmt::Debug for DiskPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiskPlan")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DiskPlan {
    /// Plan against the built-in tables
    pub fn new(config: DevicesConfiguration) -> Self {
        Self::with_catalogs(
            config,
            DiskTypeCatalog::builtin(),
            InstanceLimitCatalog::builtin(),
        )
    }

    /// Plan against caller-supplied tables
    pub fn with_catalogs(
        config: DevicesConfiguration,
        disk_types: Arc<dyn DiskTypeLookup>,
        instance_limits: Arc<dyn InstanceLimitLookup>,
    ) -> Self {
        Self {
            config,
            disk_types,
            instance_limits,
        }
    }

    pub fn config(&self) -> &DevicesConfiguration {
        &self.config
    }

    pub fn limits(&self) -> InstanceLimits {
        self.instance_limits.limits(&self.config.instance_size)
    }

    pub fn resolve(&self, index: usize) -> ResolvedDevice {
        resolve_device(&self.config, index)
    }

    pub fn resolved_devices(&self) -> Vec<ResolvedDevice> {
        resolve_all(&self.config)
    }

    pub fn assigned_luns(&self) -> Vec<i64> {
        assigned_luns(&self.config)
    }

    pub fn validate(&self) -> ValidationResult {
        validate(&self.config, self.disk_types.as_ref(), self.instance_limits.as_ref())
    }

    pub fn estimate_performance(&self) -> PerformanceProfile {
        estimate_performance(&self.config, self.disk_types.as_ref())
    }

    pub fn estimate_cost(&self) -> CostEstimate {
        estimate_cost(&self.config, self.disk_types.as_ref())
    }

    pub fn emit_device_fragment(&self) -> Vec<Value> {
        emit_device_fragment(&self.config)
    }

    pub fn emit_storage_profile(&self, os_disk_fragment: Value) -> Value {
        emit_storage_profile(&self.config, os_disk_fragment)
    }

    pub fn emit_parameters(&self) -> Value {
        emit_parameters(&self.config)
    }

    pub fn report(&self) -> PlanReport {
        PlanReport {
            validation: self.validate(),
            performance: self.estimate_performance(),
            cost: self.estimate_cost(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::disk_types::DiskTypeDescriptor;
    use crate::types::{CachingMode, DiskType};

    fn config() -> DevicesConfiguration {
        DevicesConfiguration::new(
            "vm1",
            "rg1",
            "Standard_D4s_v3",
            2,
            128,
            DiskType::StandardSsd,
            CachingMode::ReadOnly,
        )
    }

    #[test]
    fn test_builtin_plan() {
        let plan = DiskPlan::new(config());
        assert!(plan.validate().valid);
        assert_eq!(plan.limits().max_data_disk_count, 8);
        assert_eq!(plan.assigned_luns(), vec![0, 1]);
    }

    #[test]
    fn test_injected_catalogs() {
        let disk_types = DiskTypeCatalog::empty()
            .with_entry(DiskType::StandardSsd, DiskTypeDescriptor::new(1.0, 10.0, 1.0, false));
        let limits = InstanceLimitCatalog::empty().with_size("Standard_D4s_v3", 1);
        let plan = DiskPlan::with_catalogs(config(), Arc::new(disk_types), Arc::new(limits));

        assert!(!plan.validate().valid);
        assert_eq!(plan.estimate_performance().total_iops, 2560);
        assert_eq!(plan.estimate_cost().total_monthly_cost, 256.0);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let plan = DiskPlan::new(config());
        assert_eq!(plan.validate(), plan.validate());
        assert_eq!(plan.estimate_performance(), plan.estimate_performance());
        assert_eq!(plan.estimate_cost(), plan.estimate_cost());
        assert_eq!(plan.emit_device_fragment(), plan.emit_device_fragment());
    }

    #[test]
    fn test_report_serializes() {
        let report = DiskPlan::new(config()).report();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["validation"]["valid"], true);
        assert_eq!(json["performance"]["performanceTier"], "Standard");
        assert_eq!(json["cost"]["currency"], "USD");
    }
}
