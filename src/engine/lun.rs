//! LUN allocator
//!
//! Derives the per-index LUN assignment of a configuration and finds the
//! values that are assigned more than once.

use std::collections::{BTreeSet, HashMap};

use crate::config_file::DevicesConfiguration;
use crate::engine::resolver::resolve_all;

/// Highest LUN a guest can address
pub const MAX_LUN: i64 = 63;

/// LUN of every device, in index order (not sorted).
pub fn assigned_luns(config: &DevicesConfiguration) -> Vec<i64> {
    resolve_all(config).into_iter().map(|device| device.lun).collect()
}

/// Values that appear at more than one index, each reported once.
pub fn duplicate_luns(luns: &[i64]) -> BTreeSet<i64> {
    let mut first_seen: HashMap<i64, usize> = HashMap::with_capacity(luns.len());
    let mut duplicates = BTreeSet::new();

    for (index, lun) in luns.iter().enumerate() {
        if first_seen.contains_key(lun) {
            duplicates.insert(*lun);
        } else {
            first_seen.insert(*lun, index);
        }
    }

    duplicates
}

pub fn is_valid_lun(lun: i64) -> bool {
    (0..=MAX_LUN).contains(&lun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_file::DeviceOverride;
    use crate::types::{CachingMode, DiskType};

    fn config(count: i64) -> DevicesConfiguration {
        DevicesConfiguration::new(
            "vm1",
            "rg1",
            "Standard_D8s_v3",
            count,
            64,
            DiskType::StandardSsd,
            CachingMode::None,
        )
    }

    #[test]
    fn test_index_order_is_preserved() {
        let config = config(3).with_override(DeviceOverride::at(0).lun(20));
        assert_eq!(assigned_luns(&config), vec![20, 1, 2]);
    }

    #[test]
    fn test_no_duplicates() {
        assert!(duplicate_luns(&[0, 1, 2, 3]).is_empty());
        assert!(duplicate_luns(&[]).is_empty());
    }

    #[test]
    fn test_duplicates_reported_once() {
        let duplicates = duplicate_luns(&[5, 5, 5, 2, 2, 7]);
        assert_eq!(duplicates.into_iter().collect::<Vec<_>>(), vec![2, 5]);
    }

    #[test]
    fn test_override_collides_with_default_lun() {
        // Device 0 is moved onto device 1's default slot
        let config = config(2).with_override(DeviceOverride::at(0).lun(1));
        let duplicates = duplicate_luns(&assigned_luns(&config));
        assert!(duplicates.contains(&1));
        assert_eq!(duplicates.len(), 1);
    }

    #[test]
    fn test_lun_range() {
        assert!(is_valid_lun(0));
        assert!(is_valid_lun(63));
        assert!(!is_valid_lun(64));
        assert!(!is_valid_lun(-1));
    }
}
