use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::Workload;

/// diskplan - plan, validate and cost VM data disks
#[derive(Parser)]
#[command(name = "diskplan")]
#[command(about = "Resolve, validate, cost and emit data-disk plans for virtual machines")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a data-disk configuration file
    Validate {
        /// Path to configuration file to validate
        config: PathBuf,
    },
    /// Estimate per-disk and aggregate IOPS / throughput
    Performance {
        /// Path to configuration file
        config: PathBuf,
    },
    /// Estimate monthly and annual storage cost
    Cost {
        /// Path to configuration file
        config: PathBuf,
    },
    /// Emit the template parameters and storage profile
    Template {
        /// Path to configuration file
        config: PathBuf,
        /// JSON file holding the OS-disk object (or a partial storage profile with `osDisk`)
        #[arg(long)]
        os_disk: Option<PathBuf>,
    },
    /// Validation, performance and cost in a single report
    Report {
        /// Path to configuration file
        config: PathBuf,
    },
    /// Write a starter configuration for a workload
    Init {
        /// Where to write the configuration
        #[arg(short, long)]
        output: PathBuf,
        /// Virtual machine name
        #[arg(long)]
        name: String,
        /// Resource group name
        #[arg(long)]
        resource_group: String,
        /// Instance size (e.g. Standard_D4s_v3)
        #[arg(long)]
        size: String,
        /// Number of data disks
        #[arg(short, long, default_value_t = 1)]
        count: i64,
        /// Workload the disks are for (general, database, logs, backup)
        #[arg(short, long, default_value_t = Workload::General)]
        workload: Workload,
        /// Azure region (defaults to eastus)
        #[arg(short, long)]
        location: Option<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
