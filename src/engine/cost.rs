//! Cost model
//!
//! Groups resolved devices by disk type (first-seen order) and prices each
//! group as `count * average size * price per GB-month`.

use serde::Serialize;
use tracing::debug;

use crate::catalog::disk_types::DiskTypeLookup;
use crate::config_file::DevicesConfiguration;
use crate::engine::resolver::resolve_all;
use crate::types::DiskType;

pub const CURRENCY: &str = "USD";
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Cost of all devices sharing one disk type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    #[serde(rename = "type")]
    pub disk_type: DiskType,
    pub count: usize,
    #[serde(rename = "avgSizeGB")]
    pub avg_size_gb: f64,
    #[serde(rename = "pricePerGBMonth")]
    pub price_per_gb_month: f64,
    pub subtotal_monthly: f64,
}

/// Estimated storage cost of a plan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub currency: String,
    pub total_monthly_cost: f64,
    pub total_annual_cost: f64,
    pub cost_per_disk_monthly: f64,
    pub breakdown: Vec<CostBreakdown>,
}

/// Estimate monthly and annual cost.
///
/// Runs on any configuration, valid or not. With no devices every total
/// is zero and the breakdown is empty.
pub fn estimate_cost(config: &DevicesConfiguration, disk_types: &dyn DiskTypeLookup) -> CostEstimate {
    let devices = resolve_all(config);

    // (type, sizes) in first-seen order
    let mut groups: Vec<(DiskType, Vec<u32>)> = Vec::new();
    for device in &devices {
        match groups.iter_mut().find(|(t, _)| *t == device.disk_type) {
            Some((_, sizes)) => sizes.push(device.size_gb),
            None => groups.push((device.disk_type, vec![device.size_gb])),
        }
    }

    let breakdown: Vec<CostBreakdown> = groups
        .into_iter()
        .map(|(disk_type, sizes)| {
            let count = sizes.len();
            let total_size: f64 = sizes.iter().map(|s| f64::from(*s)).sum();
            let avg_size_gb = total_size / count as f64;
            let price_per_gb_month = disk_types.describe(disk_type).price_per_gb_month;
            CostBreakdown {
                disk_type,
                count,
                avg_size_gb,
                price_per_gb_month,
                subtotal_monthly: count as f64 * avg_size_gb * price_per_gb_month,
            }
        })
        .collect();

    let total_monthly_cost: f64 = breakdown.iter().map(|group| group.subtotal_monthly).sum();
    let cost_per_disk_monthly = if devices.is_empty() {
        0.0
    } else {
        total_monthly_cost / devices.len() as f64
    };

    debug!(
        "Cost estimate for {}: {:.2} {}/month across {} group(s)",
        config.instance_name,
        total_monthly_cost,
        CURRENCY,
        breakdown.len()
    );

    CostEstimate {
        currency: CURRENCY.to_string(),
        total_monthly_cost,
        total_annual_cost: total_monthly_cost * MONTHS_PER_YEAR,
        cost_per_disk_monthly,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::disk_types::{DiskTypeCatalog, DiskTypeDescriptor};
    use crate::config_file::DeviceOverride;
    use crate::types::CachingMode;

    fn config(count: i64, size_gb: u32, disk_type: DiskType) -> DevicesConfiguration {
        DevicesConfiguration::new(
            "vm1",
            "rg1",
            "Standard_D8s_v3",
            count,
            size_gb,
            disk_type,
            CachingMode::None,
        )
    }

    fn flat_prices() -> DiskTypeCatalog {
        DiskTypeCatalog::empty()
            .with_entry(DiskType::StandardHdd, DiskTypeDescriptor::new(0.5, 1.0, 0.1, false))
            .with_entry(DiskType::Premium, DiskTypeDescriptor::new(1.0, 5.0, 0.2, true))
    }

    #[test]
    fn test_single_group() {
        let estimate = estimate_cost(&config(2, 100, DiskType::StandardHdd), &flat_prices());
        assert_eq!(estimate.breakdown.len(), 1);
        assert_eq!(estimate.breakdown[0].count, 2);
        assert_eq!(estimate.breakdown[0].avg_size_gb, 100.0);
        assert_eq!(estimate.total_monthly_cost, 100.0);
        assert_eq!(estimate.total_annual_cost, 1200.0);
        assert_eq!(estimate.cost_per_disk_monthly, 50.0);
        assert_eq!(estimate.currency, "USD");
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let config = config(3, 100, DiskType::StandardHdd)
            .with_override(DeviceOverride::at(0).disk_type(DiskType::Premium).size_gb(200));
        let estimate = estimate_cost(&config, &flat_prices());

        let types: Vec<DiskType> = estimate.breakdown.iter().map(|g| g.disk_type).collect();
        assert_eq!(types, vec![DiskType::Premium, DiskType::StandardHdd]);
        assert_eq!(estimate.breakdown[0].subtotal_monthly, 200.0);
        assert_eq!(estimate.breakdown[1].subtotal_monthly, 100.0);
        assert_eq!(estimate.total_monthly_cost, 300.0);
    }

    #[test]
    fn test_average_size_not_sum() {
        let config = config(2, 100, DiskType::Premium)
            .with_override(DeviceOverride::at(1).size_gb(300));
        let estimate = estimate_cost(&config, &flat_prices());
        assert_eq!(estimate.breakdown[0].avg_size_gb, 200.0);
        assert_eq!(estimate.breakdown[0].subtotal_monthly, 400.0);
    }

    #[test]
    fn test_zero_devices() {
        let estimate = estimate_cost(&config(0, 100, DiskType::Premium), &flat_prices());
        assert_eq!(estimate.total_monthly_cost, 0.0);
        assert_eq!(estimate.total_annual_cost, 0.0);
        assert_eq!(estimate.cost_per_disk_monthly, 0.0);
        assert!(estimate.breakdown.is_empty());
    }

    #[test]
    fn test_builtin_premium_price() {
        let estimate = estimate_cost(&config(1, 1000, DiskType::Premium), &DiskTypeCatalog::default());
        assert!((estimate.total_monthly_cost - 135.0).abs() < 1e-9);
    }
}
