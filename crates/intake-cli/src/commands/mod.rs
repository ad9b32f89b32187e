//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod extract;
pub mod merge;
pub mod sheet;

use std::path::Path;

use intake_core::IntakeConfig;

/// Load the engine configuration, falling back to built-in defaults.
pub(crate) fn load_config(path: Option<&str>) -> anyhow::Result<IntakeConfig> {
    match path {
        Some(p) => Ok(IntakeConfig::from_file(Path::new(p))?),
        None => Ok(IntakeConfig::default()),
    }
}
