//! diskplan - main entry point
//!
//! Thin command-line layer over the library: loads configuration files,
//! runs one engine operation and prints the result as JSON on stdout.
//! Logs go to stderr.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use diskplan::cli::{Cli, Commands};
use diskplan::error::DiskPlanError;
use diskplan::{DevicesConfiguration, DiskPlan};

/// Initialize tracing with RUST_LOG support
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);
    debug!("CLI arguments parsed");

    if let Err(e) = run(cli.command) {
        error!("{:#}", e);
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Validate { config } => {
            let plan = load_plan(&config)?;
            let result = plan.validate();
            print_json(&result)?;
            if !result.valid {
                return Err(DiskPlanError::validation(format!(
                    "{} error(s) in {}",
                    result.errors.len(),
                    config.display()
                ))
                .into());
            }
            info!("Configuration is valid");
        }
        Commands::Performance { config } => {
            print_json(&load_plan(&config)?.estimate_performance())?;
        }
        Commands::Cost { config } => {
            print_json(&load_plan(&config)?.estimate_cost())?;
        }
        Commands::Template { config, os_disk } => {
            let plan = load_plan(&config)?;
            let os_disk = match os_disk {
                Some(path) => load_os_disk(&path)?,
                None => default_os_disk(),
            };
            print_json(&json!({
                "parameters": plan.emit_parameters(),
                "storageProfile": plan.emit_storage_profile(os_disk),
            }))?;
        }
        Commands::Report { config } => {
            let report = load_plan(&config)?.report();
            print_json(&report)?;
            if !report.validation.valid {
                return Err(DiskPlanError::validation(report.validation.summary()).into());
            }
        }
        Commands::Init {
            output,
            name,
            resource_group,
            size,
            count,
            workload,
            location,
        } => {
            let mut config =
                DevicesConfiguration::for_workload(name, resource_group, size, count, workload);
            if let Some(location) = location {
                config = config.with_location(location);
            }
            config.save_to_file(&output)?;
            info!(
                "Wrote {} starter configuration to {}",
                workload,
                output.display()
            );
        }
    }

    Ok(())
}

fn load_plan(path: &Path) -> Result<DiskPlan> {
    info!("Loading configuration from: {:?}", path);
    let config = DevicesConfiguration::load_from_file(path)?;
    debug!(
        "Loaded {} data disk(s) for {} ({})",
        config.device_count, config.instance_name, config.instance_size
    );
    Ok(DiskPlan::new(config))
}

fn load_os_disk(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .map_err(DiskPlanError::from)
        .with_context(|| format!("Failed to read OS disk fragment from {:?}", path))?;
    let value: Value = serde_json::from_str(&content).map_err(DiskPlanError::from)?;
    if !value.is_object() {
        return Err(DiskPlanError::config(format!(
            "OS disk fragment in {:?} must be a JSON object",
            path
        ))
        .into());
    }
    Ok(value)
}

fn default_os_disk() -> Value {
    json!({
        "createOption": "FromImage",
        "managedDisk": { "storageAccountType": "Premium_LRS" },
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(DiskPlanError::from)?;
    println!("{}", rendered);
    Ok(())
}
