//! Static lookup tables the planning engine consults.
//!
//! Both tables sit behind a trait so callers (and tests) can substitute
//! their own data. The default implementations are read-only, built once
//! and shared for the life of the process.

pub mod disk_types;
pub mod instance_limits;
