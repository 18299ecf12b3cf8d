//! Template emitter
//!
//! Produces the ARM template pieces for a VM's data disks. Size, type and
//! caching are emitted as parameter references, never as resolved values,
//! so one fragment serves every deployment of the template.
//!
//! | Device count | `storageProfile` gets |
//! |--------------|-----------------------|
//! | 0 (or less)  | no data-disk field at all |
//! | 1            | `dataDisks: [entry]` |
//! | n > 1        | `copy: [{ name: "dataDisks", count, input: entry }]` |
//!
//! Name and LUN always use the copy-index expression, even for a single
//! disk where `copyIndex()` evaluates to 0.

use serde_json::{json, Map, Value};
use strum::IntoEnumIterator;

use crate::config_file::DevicesConfiguration;
use crate::engine::lun::MAX_LUN;
use crate::engine::validator::{MAX_DISK_SIZE_GB, MIN_DISK_SIZE_GB};
use crate::types::{CachingMode, DiskType};

/// Copy-loop name; also the storage-profile property the loop produces
pub const COPY_LOOP_NAME: &str = "dataDisks";

const OS_DISK_KEY: &str = "osDisk";

pub const PARAM_VM_NAME: &str = "vmName";
pub const PARAM_DISK_COUNT: &str = "dataDiskCount";
pub const PARAM_DISK_SIZE: &str = "dataDiskSizeGB";
pub const PARAM_DISK_TYPE: &str = "dataDiskType";
pub const PARAM_DISK_CACHING: &str = "dataDiskCaching";
pub const PARAM_LUN_START: &str = "lunStart";

fn parameter_ref(name: &str) -> String {
    format!("[parameters('{}')]", name)
}

/// One data-disk entry keyed off `index_expr`
fn device_entry(index_expr: &str) -> Value {
    json!({
        "name": format!(
            "[concat(parameters('{}'), '-datadisk', {})]",
            PARAM_VM_NAME, index_expr
        ),
        "lun": format!("[add(parameters('{}'), {})]", PARAM_LUN_START, index_expr),
        "createOption": "Empty",
        "diskSizeGB": parameter_ref(PARAM_DISK_SIZE),
        "caching": parameter_ref(PARAM_DISK_CACHING),
        "managedDisk": {
            "storageAccountType": parameter_ref(PARAM_DISK_TYPE),
        },
    })
}

/// Data-disk fragment: empty, a single plain entry, or a single copy loop.
pub fn emit_device_fragment(config: &DevicesConfiguration) -> Vec<Value> {
    match config.planned_count() {
        0 => Vec::new(),
        1 => vec![device_entry("copyIndex()")],
        _ => {
            let index_expr = format!("copyIndex('{}')", COPY_LOOP_NAME);
            vec![json!({
                "name": COPY_LOOP_NAME,
                "count": parameter_ref(PARAM_DISK_COUNT),
                "input": device_entry(&index_expr),
            })]
        }
    }
}

/// Merge the caller's OS-disk fragment with the data-disk fragment.
///
/// The fragment lands under `osDisk`. An object that already carries an
/// `osDisk` key is taken as a partial storage profile and merged key by key
/// (so it may also carry `imageReference`, ...).
pub fn emit_storage_profile(config: &DevicesConfiguration, os_disk_fragment: Value) -> Value {
    let mut profile = Map::new();
    match os_disk_fragment {
        Value::Object(fields) if fields.contains_key(OS_DISK_KEY) => profile.extend(fields),
        other => {
            profile.insert(OS_DISK_KEY.to_string(), other);
        }
    }

    let fragment = emit_device_fragment(config);
    if !fragment.is_empty() {
        let key = if config.planned_count() == 1 {
            "dataDisks"
        } else {
            "copy"
        };
        profile.insert(key.to_string(), Value::Array(fragment));
    }

    Value::Object(profile)
}

/// Parameter declarations referenced by the fragment, defaulted from the configuration
pub fn emit_parameters(config: &DevicesConfiguration) -> Value {
    let disk_types: Vec<String> = DiskType::iter().map(|t| t.to_string()).collect();
    let caching_modes: Vec<String> = CachingMode::iter().map(|c| c.to_string()).collect();

    json!({
        PARAM_VM_NAME: {
            "type": "string",
            "defaultValue": config.instance_name,
        },
        PARAM_DISK_COUNT: {
            "type": "int",
            "defaultValue": config.planned_count(),
            "minValue": 0,
        },
        PARAM_DISK_SIZE: {
            "type": "int",
            "defaultValue": config.size_gb,
            "minValue": MIN_DISK_SIZE_GB,
            "maxValue": MAX_DISK_SIZE_GB,
        },
        PARAM_DISK_TYPE: {
            "type": "string",
            "defaultValue": config.disk_type.to_string(),
            "allowedValues": disk_types,
        },
        PARAM_DISK_CACHING: {
            "type": "string",
            "defaultValue": config.caching.to_string(),
            "allowedValues": caching_modes,
        },
        PARAM_LUN_START: {
            "type": "int",
            "defaultValue": config.lun_start,
            "minValue": 0,
            "maxValue": MAX_LUN,
        },
    })
}
